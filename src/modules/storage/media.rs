use async_trait::async_trait;
use axum::extract::multipart::Field;
use tracing::debug;

use crate::core::error::AppError;
use crate::shared::constants::{is_image_type_allowed, ALLOWED_IMAGE_TYPES, MAX_IMAGE_SIZE};

/// Logical folder an upload is filed under on the media host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFolder {
    Users,
    Reports,
}

impl MediaFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaFolder::Users => "usuarios",
            MediaFolder::Reports => "reportes",
        }
    }
}

/// An image read from a multipart part, already checked for type and size
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub data: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

impl MediaUpload {
    /// Reads a file part. An empty part (no file chosen in the form) yields `None`.
    pub async fn from_field(field: Field<'_>) -> Result<Option<Self>, AppError> {
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unnamed".to_string());

        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("No se pudo leer el archivo: {}", e))
        })?;

        if data.is_empty() {
            return Ok(None);
        }

        Self::new(data.to_vec(), content_type, file_name).map(Some)
    }

    pub fn new(data: Vec<u8>, content_type: String, file_name: String) -> Result<Self, AppError> {
        if data.len() > MAX_IMAGE_SIZE {
            return Err(AppError::BadRequest(format!(
                "Archivo demasiado grande. Tamaño máximo {} MB",
                MAX_IMAGE_SIZE / 1024 / 1024
            )));
        }

        if !is_image_type_allowed(&content_type) {
            return Err(AppError::BadRequest(format!(
                "Tipo de archivo '{}' no permitido. Tipos permitidos: {}",
                content_type,
                ALLOWED_IMAGE_TYPES.join(", ")
            )));
        }

        Ok(Self {
            data,
            content_type,
            file_name,
        })
    }
}

/// Reads a text part of a multipart form
pub async fn read_text_field(field: Field<'_>) -> Result<String, AppError> {
    let name = field.name().unwrap_or("").to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Campo '{}' inválido: {}", name, e)))
}

/// Third-party image host. Uploads bytes into a folder and returns a durable public URL.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, folder: MediaFolder, upload: MediaUpload) -> Result<String, AppError>;
}
