use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::Role;
use crate::features::users::models::User;
use crate::shared::validators::not_blank;

/// Public view of a user account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserResponseDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Request DTO for renaming a profile
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[serde(default, alias = "nombreCompleto")]
    #[validate(custom(function = "not_blank"))]
    pub full_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedProfileDto {
    pub full_name: String,
}

/// Multipart form for `PUT /api/usuario/{id}/foto`
///
/// Documentation only; the handler reads the parts from axum's Multipart extractor.
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct UploadPhotoForm {
    /// Image file (jpeg, png or webp)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub foto: String,
    /// Optional new full name
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedPhotoDto {
    /// Full name, present when the form also renamed the profile
    pub full_name: Option<String>,
    pub photo: String,
}
