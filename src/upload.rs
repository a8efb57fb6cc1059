use log::error;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::errors::ApiError;

#[derive(Serialize, Debug, Clone)]
pub struct StoredFile {
    pub filename: String,
    pub url: String,
}

/// Storage backend seam; only the local-disk implementation ships, an S3
/// store would slot in behind the same trait.
pub trait FileStore: Send + Sync {
    fn save(&self, original_name: &str, bytes: Vec<u8>) -> Result<StoredFile, ApiError>;
}

pub struct LocalFileStore {
    dir: PathBuf,
}

impl LocalFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

fn extension_of(name: &str) -> Option<&str> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
}

impl FileStore for LocalFileStore {
    fn save(&self, original_name: &str, bytes: Vec<u8>) -> Result<StoredFile, ApiError> {
        // Client filenames are untrusted; only the extension survives
        let filename = match extension_of(original_name) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };

        let path = self.dir.join(&filename);
        fs::write(&path, bytes).map_err(|e| {
            error!("Failed to store upload at {}: {}", path.display(), e);
            ApiError::Internal("Failed to store file".to_string())
        })?;

        Ok(StoredFile {
            url: format!("/uploads/{}", filename),
            filename,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> LocalFileStore {
        let dir = std::env::temp_dir().join(format!("eduportal-test-{}", Uuid::new_v4()));
        LocalFileStore::new(dir).unwrap()
    }

    #[test]
    fn save_keeps_extension_and_randomizes_name() {
        let store = temp_store();
        let stored = store.save("brochure.pdf", b"content".to_vec()).unwrap();
        assert!(stored.filename.ends_with(".pdf"));
        assert_ne!(stored.filename, "brochure.pdf");
        assert!(stored.url.starts_with("/uploads/"));
    }

    #[test]
    fn save_drops_suspicious_extension() {
        let store = temp_store();
        let stored = store.save("../../etc/passwd", b"x".to_vec()).unwrap();
        assert!(!stored.filename.contains('/'));
        assert!(!stored.filename.contains(".."));
    }

    #[test]
    fn saved_bytes_round_trip() {
        let store = temp_store();
        let stored = store.save("a.txt", b"hello".to_vec()).unwrap();
        let on_disk = fs::read(store.dir.join(&stored.filename)).unwrap();
        assert_eq!(on_disk, b"hello");
    }
}
