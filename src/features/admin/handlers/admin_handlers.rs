use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::features::admin::dtos::*;
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::features::reports::dtos::ReportResponseDto;
use crate::shared::types::ApiResponse;

/// List every report for validation
#[utoipa::path(
    get,
    path = "/api/validacionReportes",
    responses(
        (status = 200, description = "All reports, newest first", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Administrator access required")
    ),
    tag = "validation",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_reports(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = service.list_reports().await?;
    Ok(Json(ApiResponse::list(reports)))
}

/// Approve or reject a pending report
#[utoipa::path(
    put,
    path = "/api/validacionReportes/{id}/estado",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<StatusUpdatedDto>),
        (status = 400, description = "Invalid status"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Administrator access required"),
        (status = 404, description = "Report not found"),
        (status = 409, description = "Transition not allowed")
    ),
    tag = "validation",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateStatusDto>,
) -> Result<Json<ApiResponse<StatusUpdatedDto>>> {
    let next = dto.parse()?;
    let updated = service.update_status(id, next).await?;

    tracing::debug!(admin_id = admin.user_id, report_id = id, "Validated report");

    Ok(Json(ApiResponse::success(
        Some(updated),
        Some("Estado actualizado".to_string()),
        None,
    )))
}
