use actix_web::{get, post, put, web, HttpResponse};

use crate::auth::{AdminUser, AuthedUser};
use crate::db::DbPool;
use crate::errors::ApiError;
use crate::events::EventRecorder;
use crate::models::{AuditAction, CreateApplicationRequest, ListQuery, ReviewApplicationRequest};
use crate::services::applications::ApplicationService;

pub const CHANNEL: &str = "applications";

#[post("/applications")]
pub async fn create(
    user: AuthedUser,
    pool: web::Data<DbPool>,
    body: web::Json<CreateApplicationRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;

    let created = ApplicationService::create(user.id, body, &pool).await?;
    Ok(HttpResponse::Created().json(created))
}

#[get("/applications/mine")]
pub async fn list_mine(
    user: AuthedUser,
    pool: web::Data<DbPool>,
    q: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = ApplicationService::list_mine(user.id, q.into_inner(), &pool).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/applications")]
pub async fn list_admin(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    q: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = ApplicationService::list(q.into_inner(), &pool).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[put("/applications/{id}/review")]
pub async fn review(
    admin: AdminUser,
    pool: web::Data<DbPool>,
    events: web::Data<EventRecorder>,
    path: web::Path<i32>,
    body: web::Json<ReviewApplicationRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;

    let reviewed =
        ApplicationService::review(path.into_inner(), admin.0.id, body, &pool).await?;
    events
        .record(&admin.0, AuditAction::Update, CHANNEL, reviewed.id)
        .await;
    Ok(HttpResponse::Ok().json(reviewed))
}
