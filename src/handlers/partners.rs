use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::auth::AdminUser;
use crate::db::DbPool;
use crate::errors::ApiError;
use crate::events::EventRecorder;
use crate::models::{AuditAction, CreatePartnerRequest, ListQuery, PartnerChanges};
use crate::services::partners::PartnerService;

pub const CHANNEL: &str = "partners";

#[get("/partners")]
pub async fn list_public(
    pool: web::Data<DbPool>,
    q: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = PartnerService::list(q.into_inner(), true, &pool).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/partners")]
pub async fn list_admin(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    q: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = PartnerService::list(q.into_inner(), false, &pool).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("/partners")]
pub async fn create(
    admin: AdminUser,
    pool: web::Data<DbPool>,
    events: web::Data<EventRecorder>,
    body: web::Json<CreatePartnerRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;

    let created = PartnerService::create(body, &pool).await?;
    events
        .record(&admin.0, AuditAction::Create, CHANNEL, created.id)
        .await;
    Ok(HttpResponse::Created().json(created))
}

#[put("/partners/{id}")]
pub async fn update(
    admin: AdminUser,
    pool: web::Data<DbPool>,
    events: web::Data<EventRecorder>,
    path: web::Path<i32>,
    body: web::Json<PartnerChanges>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;

    let updated = PartnerService::update(path.into_inner(), body, &pool).await?;
    events
        .record(&admin.0, AuditAction::Update, CHANNEL, updated.id)
        .await;
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/partners/{id}")]
pub async fn remove(
    admin: AdminUser,
    pool: web::Data<DbPool>,
    events: web::Data<EventRecorder>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    PartnerService::delete(id, &pool).await?;
    events.record(&admin.0, AuditAction::Delete, CHANNEL, id).await;
    Ok(HttpResponse::NoContent().finish())
}
