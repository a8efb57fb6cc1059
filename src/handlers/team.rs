use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::auth::AdminUser;
use crate::db::DbPool;
use crate::errors::ApiError;
use crate::events::EventRecorder;
use crate::models::{AuditAction, CreateTeamMemberRequest, ListQuery, TeamMemberChanges};
use crate::services::team::TeamService;

pub const CHANNEL: &str = "team_members";

#[get("/team")]
pub async fn list_public(
    pool: web::Data<DbPool>,
    q: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = TeamService::list(q.into_inner(), true, &pool).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/team")]
pub async fn list_admin(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    q: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = TeamService::list(q.into_inner(), false, &pool).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("/team")]
pub async fn create(
    admin: AdminUser,
    pool: web::Data<DbPool>,
    events: web::Data<EventRecorder>,
    body: web::Json<CreateTeamMemberRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;

    let created = TeamService::create(body, &pool).await?;
    events
        .record(&admin.0, AuditAction::Create, CHANNEL, created.id)
        .await;
    Ok(HttpResponse::Created().json(created))
}

#[put("/team/{id}")]
pub async fn update(
    admin: AdminUser,
    pool: web::Data<DbPool>,
    events: web::Data<EventRecorder>,
    path: web::Path<i32>,
    body: web::Json<TeamMemberChanges>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;

    let updated = TeamService::update(path.into_inner(), body, &pool).await?;
    events
        .record(&admin.0, AuditAction::Update, CHANNEL, updated.id)
        .await;
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/team/{id}")]
pub async fn remove(
    admin: AdminUser,
    pool: web::Data<DbPool>,
    events: web::Data<EventRecorder>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    TeamService::delete(id, &pool).await?;
    events.record(&admin.0, AuditAction::Delete, CHANNEL, id).await;
    Ok(HttpResponse::NoContent().finish())
}
