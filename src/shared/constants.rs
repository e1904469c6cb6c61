/// Image MIME types accepted for profile photos and report evidence
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Maximum accepted image size in bytes (5MB)
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Body limit for routes that accept an image upload (image plus multipart overhead)
pub const UPLOAD_BODY_LIMIT: usize = MAX_IMAGE_SIZE + 1024 * 1024;

/// Number of reports returned by the most-voted dashboard ranking
pub const TOP_VOTED_LIMIT: i64 = 10;

pub fn is_image_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}

/// File extension used for stored objects of an accepted image type
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}
