use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::auth::AdminUser;
use crate::db::DbPool;
use crate::errors::ApiError;
use crate::events::EventRecorder;
use crate::models::{
    AuditAction, ContentStatus, CreateScholarshipRequest, ListQuery, ScholarshipChanges,
};
use crate::services::scholarships::ScholarshipService;

pub const CHANNEL: &str = "scholarships";

// Public list: only published scholarships, whatever the client asks for
#[get("/scholarships")]
pub async fn list_public(
    pool: web::Data<DbPool>,
    q: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let mut q = q.into_inner();
    q.status = Some(ContentStatus::Published.as_str().to_string());
    let page = ScholarshipService::list(q, &pool).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/scholarships")]
pub async fn list_admin(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    q: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = ScholarshipService::list(q.into_inner(), &pool).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("/scholarships")]
pub async fn create(
    admin: AdminUser,
    pool: web::Data<DbPool>,
    events: web::Data<EventRecorder>,
    body: web::Json<CreateScholarshipRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;

    let created = ScholarshipService::create(body, admin.0.id, &pool).await?;
    events
        .record(&admin.0, AuditAction::Create, CHANNEL, created.id)
        .await;
    Ok(HttpResponse::Created().json(created))
}

#[put("/scholarships/{id}")]
pub async fn update(
    admin: AdminUser,
    pool: web::Data<DbPool>,
    events: web::Data<EventRecorder>,
    path: web::Path<i32>,
    body: web::Json<ScholarshipChanges>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;

    let updated = ScholarshipService::update(path.into_inner(), body, &pool).await?;
    events
        .record(&admin.0, AuditAction::Update, CHANNEL, updated.id)
        .await;
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/scholarships/{id}")]
pub async fn remove(
    admin: AdminUser,
    pool: web::Data<DbPool>,
    events: web::Data<EventRecorder>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    ScholarshipService::delete(id, &pool).await?;
    events.record(&admin.0, AuditAction::Delete, CHANNEL, id).await;
    Ok(HttpResponse::NoContent().finish())
}
