use axum::extract::Multipart;
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::shared::constants::MAX_IMAGE_SIZE;
use crate::shared::validation::{image_extension, is_image_mime_type_allowed};

/// An image read from a multipart `file` field and checked against the
/// accepted types and size
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub data: Vec<u8>,
    pub content_type: String,
    pub extension: &'static str,
}

impl ImageUpload {
    pub fn from_parts(data: Vec<u8>, content_type: &str) -> Result<Self> {
        if data.is_empty() {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }

        if data.len() > MAX_IMAGE_SIZE {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} MB",
                MAX_IMAGE_SIZE / 1024 / 1024
            )));
        }

        let extension = image_extension(content_type)
            .filter(|_| is_image_mime_type_allowed(content_type))
            .ok_or_else(|| {
                AppError::BadRequest(format!("Unsupported image type: {}", content_type))
            })?;

        Ok(Self {
            data,
            content_type: content_type.to_string(),
            extension,
        })
    }

    /// Storage path for a category or product image: `{id}-{unix_millis}.{ext}`
    pub fn record_path(&self, record_id: Uuid) -> String {
        format!(
            "{}-{}.{}",
            record_id,
            chrono::Utc::now().timestamp_millis(),
            self.extension
        )
    }
}

/// Read the `file` field of a multipart body; other fields are ignored
pub async fn read_image_upload(mut multipart: Multipart) -> Result<ImageUpload> {
    let mut upload: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();
        if field_name != "file" {
            debug!("Ignoring unknown field: {}", field_name);
            continue;
        }

        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;

        upload = Some((data.to_vec(), content_type));
    }

    let (data, content_type) =
        upload.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    ImageUpload::from_parts(data, &content_type)
}
