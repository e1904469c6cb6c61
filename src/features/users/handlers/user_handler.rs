use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::auth::guards::ensure_owner;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{
    UpdateProfileDto, UpdatedPhotoDto, UpdatedProfileDto, UploadPhotoForm, UserResponseDto,
};
use crate::features::users::services::UserService;
use crate::modules::storage::{read_text_field, MediaUpload};
use crate::shared::types::ApiResponse;
use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

const NOT_PROFILE_OWNER: &str = "No puedes editar el perfil de otro usuario";

#[utoipa::path(
    get,
    path = "/api/usuario",
    responses(
        (status = 200, description = "Registered users", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_users(
    State(service): State<Arc<UserService>>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let users = service.list().await?;
    Ok(Json(ApiResponse::list(users)))
}

#[utoipa::path(
    put,
    path = "/api/usuario/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Name updated", body = ApiResponse<UpdatedProfileDto>),
        (status = 400, description = "Missing name or invalid id"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Profile belongs to another user"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateProfileDto>,
) -> Result<Json<ApiResponse<UpdatedProfileDto>>> {
    ensure_owner(&user, id, NOT_PROFILE_OWNER)?;

    dto.validate()
        .map_err(|_| AppError::Validation("El nombre es requerido".to_string()))?;

    let updated = service.update_name(id, &dto.full_name).await?;
    Ok(Json(ApiResponse::success(
        Some(updated),
        Some("Nombre actualizado correctamente".to_string()),
        None,
    )))
}

/// Upload or replace the profile photo
///
/// Accepts multipart/form-data with:
/// - `foto`: the image (required)
/// - `fullName` / `nombreCompleto`: optional new name
#[utoipa::path(
    put,
    path = "/api/usuario/{id}/foto",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body(
        content = UploadPhotoForm,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 200, description = "Photo updated", body = ApiResponse<UpdatedPhotoDto>),
        (status = 400, description = "Missing or invalid file"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Profile belongs to another user"),
        (status = 502, description = "Media host unavailable")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_photo(
    user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
    AppPath(id): AppPath<i64>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UpdatedPhotoDto>>> {
    ensure_owner(&user, id, NOT_PROFILE_OWNER)?;

    let mut upload: Option<MediaUpload> = None;
    let mut full_name: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Formulario inválido: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "foto" | "photo" => upload = MediaUpload::from_field(field).await?,
            "fullName" | "nombreCompleto" => full_name = Some(read_text_field(field).await?),
            _ => debug!("Ignoring unknown field: {}", name),
        }
    }

    let upload = upload.ok_or_else(|| AppError::BadRequest("Archivo no recibido".to_string()))?;

    let updated = service.update_photo(id, upload, full_name).await?;
    Ok(Json(ApiResponse::success(
        Some(updated),
        Some("Perfil actualizado".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/usuario/{id}/foto",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Photo removed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Profile belongs to another user"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn remove_photo(
    user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    ensure_owner(&user, id, NOT_PROFILE_OWNER)?;

    service.remove_photo(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Foto eliminada".to_string()),
        None,
    )))
}
