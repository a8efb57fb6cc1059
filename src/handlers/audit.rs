use actix_web::{get, web, HttpResponse};

use crate::auth::SuperAdminUser;
use crate::db::DbPool;
use crate::errors::ApiError;
use crate::models::AuditQuery;
use crate::services::audit::AuditService;

#[get("/audit")]
pub async fn list(
    _admin: SuperAdminUser,
    pool: web::Data<DbPool>,
    q: web::Query<AuditQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = AuditService::list(q.into_inner(), &pool).await?;
    Ok(HttpResponse::Ok().json(page))
}
