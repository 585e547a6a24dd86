//! Object Storage
//!
//! Accepts a binary blob plus a folder hint and returns a public URL;
//! deletion is by URL. [`HttpObjectStore`] targets any S3-compatible
//! endpoint that allows authenticated PUT/DELETE on object keys.

use thiserror::Error;
use uuid::Uuid;

/// Allowed image content types for uploads.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
];

/// Max upload size: 5 MiB
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    #[error("File too large: {0} bytes (max {MAX_IMAGE_BYTES})")]
    FileTooLarge(usize),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Delete failed: {0}")]
    Delete(String),
}

/// Validate an image upload before it reaches storage.
pub fn validate_image(content_type: &str, len: usize) -> Result<(), StorageError> {
    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Err(StorageError::InvalidFileType(content_type.to_string()));
    }
    if len > MAX_IMAGE_BYTES {
        return Err(StorageError::FileTooLarge(len));
    }
    Ok(())
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "jpg",
    }
}

/// Stores binary blobs and returns public URLs.
#[trait_variant::make(ObjectStore: Send)]
pub trait LocalObjectStore {
    /// Store `bytes` under the folder hint, returning the public URL.
    async fn put(
        &self,
        folder: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError>;

    /// Delete a previously stored object by its public URL.
    async fn delete(&self, url: &str) -> Result<(), StorageError>;
}

/// S3-compatible HTTP object store.
#[derive(Clone)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    /// Public base URL of the bucket, no trailing slash
    base_url: String,
    access_token: String,
}

impl HttpObjectStore {
    pub fn new(base_url: String, access_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }
}

impl ObjectStore for HttpObjectStore {
    async fn put(
        &self,
        folder: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        let key = format!("{}/{}.{}", folder, Uuid::new_v4(), extension_for(content_type));
        let url = format!("{}/{}", self.base_url, key);

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.access_token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::Upload(format!(
                "storage returned {}",
                response.status()
            )));
        }

        tracing::info!(key, "Object stored");
        Ok(url)
    }

    async fn delete(&self, url: &str) -> Result<(), StorageError> {
        if !url.starts_with(&self.base_url) {
            return Err(StorageError::Delete("URL outside managed bucket".to_string()));
        }

        let response = self
            .client
            .delete(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| StorageError::Delete(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::Delete(format!(
                "storage returned {}",
                response.status()
            )));
        }

        tracing::info!(url, "Object deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_image_accepts_allowed_types() {
        assert!(validate_image("image/png", 1024).is_ok());
        assert!(validate_image("image/jpeg", 1024).is_ok());
    }

    #[test]
    fn test_validate_image_rejects_bad_type_and_size() {
        assert!(matches!(
            validate_image("application/pdf", 1024),
            Err(StorageError::InvalidFileType(_))
        ));
        assert!(matches!(
            validate_image("image/png", MAX_IMAGE_BYTES + 1),
            Err(StorageError::FileTooLarge(_))
        ));
    }

    #[test]
    fn test_extension_mapping() {
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("image/webp"), "webp");
    }
}
