use actix_web::http::header;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use diesel::prelude::*;
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::{debug, error};

use crate::config::AppConfig;
use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::models::{Claims, Role, User};

pub struct AuthService;

impl AuthService {
    pub fn hash_password(password: &str) -> Result<String, ApiError> {
        hash(password, DEFAULT_COST).map_err(|e| {
            error!("Failed to hash password: {}", e);
            ApiError::Internal("Failed to hash password".to_string())
        })
    }

    pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
        verify(password, hash).map_err(|e| {
            error!("Failed to verify password: {}", e);
            ApiError::Internal("Failed to verify password".to_string())
        })
    }

    pub fn generate_token(user: &User, config: &AppConfig) -> Result<String, ApiError> {
        let now = Utc::now();
        let iat = now.timestamp() as usize;
        let exp = (now + Duration::hours(config.jwt_expiry)).timestamp() as usize;

        let claims = Claims {
            sub: user.id.to_string(),
            exp,
            iat,
            user_id: user.id,
            username: user.username.clone(),
            role: user.role.clone(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| {
            error!("Failed to generate token: {}", e);
            ApiError::Internal("Failed to generate token".to_string())
        })
    }

    // Invalid or expired tokens are a 403, a missing one is a 401
    pub fn decode_token(token: &str, config: &AppConfig) -> Result<Claims, ApiError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            debug!("Token rejected: {}", e);
            ApiError::Forbidden("Invalid or expired token".to_string())
        })
    }
}

/// Typed request identity: produced by verifying the bearer token and
/// re-loading the user row, so deactivated accounts are cut off immediately.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AuthedUser {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

pub fn require_role(user: &AuthedUser, allowed: &[Role]) -> Result<(), ApiError> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Insufficient role".to_string()))
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, ApiError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Auth("Missing authorization header".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .map(|t| t.to_string())
        .ok_or_else(|| ApiError::Auth("Expected a bearer token".to_string()))
}

async fn authenticate(req: HttpRequest) -> Result<AuthedUser, ApiError> {
    let token = bearer_token(&req)?;

    let config = req
        .app_data::<web::Data<AppConfig>>()
        .ok_or_else(|| ApiError::Internal("App config not registered".to_string()))?;
    let pool = req
        .app_data::<web::Data<DbPool>>()
        .ok_or_else(|| ApiError::Internal("Database pool not registered".to_string()))?
        .clone();

    let claims = AuthService::decode_token(&token, config)?;

    let user = db::blocking(&pool, move |conn| {
        use crate::schema::users::dsl::*;
        users.find(claims.user_id).first::<User>(conn).optional()
    })
    .await?;

    let user = user
        .filter(|u| u.is_active)
        .ok_or_else(|| ApiError::Forbidden("Account is missing or deactivated".to_string()))?;

    let role = Role::parse(&user.role).ok_or_else(|| {
        error!("User {} has unknown role '{}'", user.id, user.role);
        ApiError::Internal("Unknown role".to_string())
    })?;

    Ok(AuthedUser {
        id: user.id,
        username: user.username,
        role,
    })
}

impl FromRequest for AuthedUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(authenticate(req))
    }
}

/// Gate for `/api/admin` routes: admin, moderator or super_admin.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthedUser);

impl FromRequest for AdminUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let user = authenticate(req).await?;
            require_role(&user, Role::ADMIN_SET)?;
            Ok(AdminUser(user))
        })
    }
}

/// Gate for destructive administration: super_admin only.
#[derive(Debug, Clone)]
pub struct SuperAdminUser(pub AuthedUser);

impl FromRequest for SuperAdminUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let user = authenticate(req).await?;
            require_role(&user, &[Role::SuperAdmin])?;
            Ok(SuperAdminUser(user))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    fn test_config() -> AppConfig {
        AppConfig {
            jwt_secret: "unit-test-secret".to_string(),
            jwt_expiry: 1,
            client_url: String::new(),
            upload_dir: String::new(),
            openai_api_key: None,
            openai_model: String::new(),
            openai_base_url: String::new(),
            super_admin_email: None,
            super_admin_password: None,
        }
    }

    fn test_user(role: &str) -> User {
        User {
            id: 7,
            username: "kofi".to_string(),
            email: "kofi@example.com".to_string(),
            password_hash: String::new(),
            role: role.to_string(),
            is_active: true,
            last_login: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn token_round_trip_preserves_identity() {
        let config = test_config();
        let token = AuthService::generate_token(&test_user("admin"), &config).unwrap();
        let claims = AuthService::decode_token(&token, &config).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "kofi");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn tampered_token_is_forbidden() {
        let config = test_config();
        let token = AuthService::generate_token(&test_user("user"), &config).unwrap();
        let mut other = test_config();
        other.jwt_secret = "different-secret".to_string();
        let err = AuthService::decode_token(&token, &other).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn expired_token_is_forbidden() {
        let config = test_config();
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: "7".to_string(),
            exp: past.timestamp() as usize,
            iat: (past - Duration::hours(1)).timestamp() as usize,
            user_id: 7,
            username: "kofi".to_string(),
            role: "user".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();
        let err = AuthService::decode_token(&token, &config).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn admin_gate_rejects_plain_user() {
        let user = AuthedUser { id: 1, username: "a".to_string(), role: Role::User };
        let err = require_role(&user, Role::ADMIN_SET).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        for role in [Role::Admin, Role::Moderator, Role::SuperAdmin] {
            let user = AuthedUser { id: 1, username: "a".to_string(), role };
            assert!(require_role(&user, Role::ADMIN_SET).is_ok());
        }
    }

    #[test]
    fn super_admin_gate_rejects_admin() {
        let user = AuthedUser { id: 1, username: "a".to_string(), role: Role::Admin };
        assert!(require_role(&user, &[Role::SuperAdmin]).is_err());
        let user = AuthedUser { id: 1, username: "a".to_string(), role: Role::SuperAdmin };
        assert!(require_role(&user, &[Role::SuperAdmin]).is_ok());
    }

    #[test]
    fn missing_authorization_header_is_unauthorized() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let err = bearer_token(&req).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn non_bearer_scheme_is_unauthorized() {
        let req = actix_web::test::TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();
        let err = bearer_token(&req).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn bearer_token_is_extracted() {
        let req = actix_web::test::TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn password_hash_verifies() {
        let hash = AuthService::hash_password("correct horse").unwrap();
        assert!(AuthService::verify_password("correct horse", &hash).unwrap());
        assert!(!AuthService::verify_password("wrong", &hash).unwrap());
    }
}
