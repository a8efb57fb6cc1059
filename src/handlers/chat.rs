use actix_web::{get, post, web, HttpResponse};

use crate::ai::AiClient;
use crate::auth::AuthedUser;
use crate::db::DbPool;
use crate::errors::ApiError;
use crate::models::ChatRequest;
use crate::services::chat::ChatService;

#[post("/chat")]
pub async fn converse(
    user: AuthedUser,
    pool: web::Data<DbPool>,
    ai: web::Data<AiClient>,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;

    let response = ChatService::converse(user.id, body, &ai, &pool).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/chat/conversations")]
pub async fn conversations(
    user: AuthedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ApiError> {
    let conversations = ChatService::list(user.id, &pool).await?;
    Ok(HttpResponse::Ok().json(conversations))
}
