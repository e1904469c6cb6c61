use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    LoginRequestDto, LoginResponseDto, RegisterRequestDto, RegisteredUserDto,
};
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

/// Register a new citizen account
#[utoipa::path(
    post,
    path = "/api/usuario",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<RegisteredUserDto>),
        (status = 400, description = "Missing fields or email already registered")
    ),
    tag = "auth"
)]
pub async fn register(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<RegisteredUserDto>>)> {
    dto.validate()
        .map_err(|_| AppError::Validation("Todos los campos son requeridos".to_string()))?;

    let user = service.register(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(user),
            Some("Usuario registrado correctamente".to_string()),
            None,
        )),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/usuario/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Missing fields, unknown email or wrong password")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {
    dto.validate()
        .map_err(|_| AppError::Validation("Correo y contraseña requeridos".to_string()))?;

    let response = service.login(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(response),
        Some("Login exitoso".to_string()),
        None,
    )))
}
