//! Storage module for uploaded media
//!
//! Provides the `MediaStore` seam used by the feature services and its
//! MinIO/S3-compatible implementation.

mod media;
mod minio_client;

pub use media::{read_text_field, MediaFolder, MediaStore, MediaUpload};
pub use minio_client::MinIOClient;
