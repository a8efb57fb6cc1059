use actix_web::{get, post, put, web, HttpResponse};

use crate::auth::SuperAdminUser;
use crate::db::DbPool;
use crate::errors::ApiError;
use crate::events::EventRecorder;
use crate::models::{AuditAction, CreateUserRequest, ListQuery, UpdateUserRequest};
use crate::services::users::UserService;

pub const CHANNEL: &str = "users";

#[get("/users")]
pub async fn list(
    _admin: SuperAdminUser,
    pool: web::Data<DbPool>,
    q: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = UserService::list(q.into_inner(), &pool).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("/users")]
pub async fn create(
    admin: SuperAdminUser,
    pool: web::Data<DbPool>,
    events: web::Data<EventRecorder>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;

    if UserService::find_by_email(&body.email, &pool).await?.is_some() {
        return Err(ApiError::Validation("Email already exists".to_string()));
    }

    let created = UserService::create(body, &pool).await?;
    events
        .record(&admin.0, AuditAction::Create, CHANNEL, created.id)
        .await;
    Ok(HttpResponse::Created().json(created))
}

#[put("/users/{id}")]
pub async fn update(
    admin: SuperAdminUser,
    pool: web::Data<DbPool>,
    events: web::Data<EventRecorder>,
    path: web::Path<i32>,
    body: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;

    let updated = UserService::update(path.into_inner(), body, &admin.0, &pool).await?;
    events
        .record(&admin.0, AuditAction::Update, CHANNEL, updated.id)
        .await;
    Ok(HttpResponse::Ok().json(updated))
}
