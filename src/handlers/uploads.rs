use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse};
use futures_util::TryStreamExt;
use log::info;

use crate::auth::AdminUser;
use crate::errors::ApiError;
use crate::upload::{FileStore, StoredFile};

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[post("/uploads")]
pub async fn upload(
    admin: AdminUser,
    store: web::Data<dyn FileStore>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let mut stored: Vec<StoredFile> = Vec::new();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| ApiError::Validation(format!("Malformed multipart body: {}", e)))?
    {
        let original_name = field
            .content_disposition()
            .get_filename()
            .unwrap_or("upload")
            .to_string();

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| ApiError::Validation(format!("Failed to read upload: {}", e)))?
        {
            if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(ApiError::Validation(
                    "file exceeds the 10MB upload limit".to_string(),
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        if bytes.is_empty() {
            continue;
        }

        let file = store.save(&original_name, bytes)?;
        info!("User {} uploaded {}", admin.0.id, file.filename);
        stored.push(file);
    }

    if stored.is_empty() {
        return Err(ApiError::Validation(
            "multipart body contained no files".to_string(),
        ));
    }

    Ok(HttpResponse::Created().json(stored))
}
