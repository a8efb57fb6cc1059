use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::auth::AdminUser;
use crate::db::DbPool;
use crate::errors::ApiError;
use crate::events::EventRecorder;
use crate::models::{AuditAction, ContentStatus, CreateJobRequest, JobChanges, ListQuery};
use crate::services::jobs::JobService;

pub const CHANNEL: &str = "jobs";

#[get("/jobs")]
pub async fn list_public(
    pool: web::Data<DbPool>,
    q: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let mut q = q.into_inner();
    q.status = Some(ContentStatus::Published.as_str().to_string());
    let page = JobService::list(q, &pool).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/jobs")]
pub async fn list_admin(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    q: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = JobService::list(q.into_inner(), &pool).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("/jobs")]
pub async fn create(
    admin: AdminUser,
    pool: web::Data<DbPool>,
    events: web::Data<EventRecorder>,
    body: web::Json<CreateJobRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;

    let created = JobService::create(body, admin.0.id, &pool).await?;
    events
        .record(&admin.0, AuditAction::Create, CHANNEL, created.id)
        .await;
    Ok(HttpResponse::Created().json(created))
}

#[put("/jobs/{id}")]
pub async fn update(
    admin: AdminUser,
    pool: web::Data<DbPool>,
    events: web::Data<EventRecorder>,
    path: web::Path<i32>,
    body: web::Json<JobChanges>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;

    let updated = JobService::update(path.into_inner(), body, &pool).await?;
    events
        .record(&admin.0, AuditAction::Update, CHANNEL, updated.id)
        .await;
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/jobs/{id}")]
pub async fn remove(
    admin: AdminUser,
    pool: web::Data<DbPool>,
    events: web::Data<EventRecorder>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    JobService::delete(id, &pool).await?;
    events.record(&admin.0, AuditAction::Delete, CHANNEL, id).await;
    Ok(HttpResponse::NoContent().finish())
}
