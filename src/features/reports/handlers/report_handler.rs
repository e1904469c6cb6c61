use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{
    CreateReportForm, CreatedReportDto, ReportFormFields, ReportResponseDto, UpdateMyReportDto,
};
use crate::features::reports::services::{CommentService, ReportService, VoteService};
use crate::modules::storage::{read_text_field, MediaUpload};
use crate::shared::types::ApiResponse;

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub report_service: Arc<ReportService>,
    pub vote_service: Arc<VoteService>,
    pub comment_service: Arc<CommentService>,
}

/// List active reports, newest first
#[utoipa::path(
    get,
    path = "/api/reporte",
    responses(
        (status = 200, description = "Active reports", body = ApiResponse<Vec<ReportResponseDto>>)
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(state): State<ReportState>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = state.report_service.list_active().await?;
    Ok(Json(ApiResponse::list(reports)))
}

/// Get an active report by ID
#[utoipa::path(
    get,
    path = "/api/reporte/{id}",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn get_report(
    State(state): State<ReportState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state.report_service.get_active(id).await?;
    Ok(Json(ApiResponse::success(Some(report), None, None)))
}

/// Submit a report
///
/// Accepts multipart/form-data; the author is always the token identity and
/// the report starts as Pendiente.
#[utoipa::path(
    post,
    path = "/api/reporte",
    request_body(
        content = CreateReportForm,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 201, description = "Report created", body = ApiResponse<CreatedReportDto>),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Media host unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn create_report(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<CreatedReportDto>>)> {
    let mut fields = ReportFormFields::default();
    let mut image: Option<MediaUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Formulario inválido: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" | "imagen" => image = MediaUpload::from_field(field).await?,
            _ => {
                let value = read_text_field(field).await?;
                if !fields.set(&name, value) {
                    debug!("Ignoring unknown field: {}", name);
                }
            }
        }
    }

    let report = fields.into_new_report()?;
    let created = state
        .report_service
        .create(user.user_id, report, image)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(created),
            Some("Reporte creado correctamente".to_string()),
            None,
        )),
    ))
}

/// List the caller's active reports
#[utoipa::path(
    get,
    path = "/api/MisReportes",
    responses(
        (status = 200, description = "Caller's reports", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_my_reports(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = state.report_service.list_by_user(user.user_id).await?;
    Ok(Json(ApiResponse::list(reports)))
}

/// Edit title, description or category of one's own active report
#[utoipa::path(
    put,
    path = "/api/MisReportes/{id}",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    request_body = UpdateMyReportDto,
    responses(
        (status = 200, description = "Report updated", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Invalid fields or unknown category"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Report belongs to another user"),
        (status = 404, description = "Report not found or inactive")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn update_my_report(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateMyReportDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    if dto.is_empty() || dto.validate().is_err() {
        return Err(AppError::Validation("Faltan campos requeridos".to_string()));
    }

    let report = state.report_service.update_own(&user, id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(report),
        Some("Reporte actualizado".to_string()),
        None,
    )))
}
