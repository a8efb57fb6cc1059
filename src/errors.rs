use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use log::{debug, error, warn};
use serde_json::json;
use thiserror::Error;

// Single authoritative error type for the whole API surface.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<diesel::result::Error> for ApiError {
    fn from(e: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};
        match e {
            Error::NotFound => ApiError::NotFound("Record not found".to_string()),
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                debug!("Unique violation: {}", info.message());
                ApiError::Validation("A record with that value already exists".to_string())
            }
            other => {
                error!("Unhandled diesel error: {}", other);
                ApiError::Database(other.to_string())
            }
        }
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Database(msg) => {
                error!("\x1B[1;31mDATABASE ERROR:\x1B[0m {}", msg);
                // Never leak driver details to the client
                HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
            }
            ApiError::Validation(msg) => {
                warn!("\x1B[1;33mVALIDATION ERROR:\x1B[0m {}", msg);
                HttpResponse::BadRequest().json(json!({ "error": msg }))
            }
            ApiError::Auth(msg) => {
                warn!("\x1B[1;33mAUTHENTICATION ERROR:\x1B[0m {}", msg);
                HttpResponse::Unauthorized().json(json!({ "error": msg }))
            }
            ApiError::Forbidden(msg) => {
                warn!("\x1B[1;33mFORBIDDEN:\x1B[0m {}", msg);
                HttpResponse::Forbidden().json(json!({ "error": msg }))
            }
            ApiError::NotFound(msg) => {
                debug!("\x1B[1;36mNOT FOUND:\x1B[0m {}", msg);
                HttpResponse::NotFound().json(json!({ "error": msg }))
            }
            ApiError::Internal(msg) => {
                error!("\x1B[1;31mINTERNAL SERVER ERROR:\x1B[0m {}", msg);
                HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(ApiError::Validation(String::new()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Auth(String::new()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden(String::new()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound(String::new()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Database(String::new()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::Internal(String::new()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn diesel_not_found_maps_to_404() {
        let err: ApiError = diesel::result::Error::NotFound.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
