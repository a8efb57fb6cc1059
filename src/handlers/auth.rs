use actix_web::{get, post, web, HttpResponse};
use log::{debug, info};

use crate::auth::{AuthService, AuthedUser};
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::errors::ApiError;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::services::users::UserService;

#[post("/auth/register")]
pub async fn register(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;

    if UserService::find_by_email(&body.email, &pool).await?.is_some() {
        debug!("Registration failed: email already exists {}", body.email);
        return Err(ApiError::Validation("Email already exists".to_string()));
    }

    let user = UserService::register(body, &pool).await?;
    let token = AuthService::generate_token(&user, &config)?;

    info!("User {} registered", user.email);
    Ok(HttpResponse::Created().json(AuthResponse { token, user }))
}

#[post("/auth/login")]
pub async fn login(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    debug!("Login attempt for {}", body.email);

    let user = match UserService::find_by_email(&body.email, &pool).await? {
        Some(user) => user,
        None => {
            debug!("Login failed: no user with email {}", body.email);
            return Err(ApiError::Auth("Invalid credentials".to_string()));
        }
    };

    if !AuthService::verify_password(&body.password, &user.password_hash)? {
        debug!("Login failed: wrong password for {}", body.email);
        return Err(ApiError::Auth("Invalid credentials".to_string()));
    }

    if !user.is_active {
        return Err(ApiError::Forbidden("Account is deactivated".to_string()));
    }

    UserService::update_last_login(user.id, &pool).await?;
    let token = AuthService::generate_token(&user, &config)?;

    info!("User {} logged in", user.email);
    Ok(HttpResponse::Ok().json(AuthResponse { token, user }))
}

#[get("/auth/me")]
pub async fn me(user: AuthedUser) -> HttpResponse {
    HttpResponse::Ok().json(user)
}
