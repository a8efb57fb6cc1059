use actix_web::{get, put, web, HttpResponse};
use serde::Deserialize;

use crate::auth::AdminUser;
use crate::db::DbPool;
use crate::errors::ApiError;
use crate::services::notifications::NotificationService;

#[derive(Deserialize, Debug, Default)]
pub struct NotificationQuery {
    pub unread: Option<bool>,
}

#[get("/notifications")]
pub async fn list(
    admin: AdminUser,
    pool: web::Data<DbPool>,
    q: web::Query<NotificationQuery>,
) -> Result<HttpResponse, ApiError> {
    let unread_only = q.unread.unwrap_or(false);
    let notifications = NotificationService::list(admin.0.id, unread_only, &pool).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

#[put("/notifications/{id}/read")]
pub async fn mark_read(
    admin: AdminUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let updated = NotificationService::mark_read(path.into_inner(), admin.0.id, &pool).await?;
    Ok(HttpResponse::Ok().json(updated))
}
