use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Report counts per status
#[utoipa::path(
    get,
    path = "/api/dashboard/reportes",
    tag = "dashboard",
    responses(
        (status = 200, description = "Counts per status", body = ApiResponse<ReportCountsDto>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_report_counts(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<ReportCountsDto>>, AppError> {
    let counts = service.report_counts().await?;
    Ok(Json(ApiResponse::success(Some(counts), None, None)))
}

/// Number of registered users
#[utoipa::path(
    get,
    path = "/api/dashboard/usuario",
    tag = "dashboard",
    responses(
        (status = 200, description = "User count", body = ApiResponse<UserCountDto>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_user_count(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<UserCountDto>>, AppError> {
    let count = service.user_count().await?;
    Ok(Json(ApiResponse::success(Some(count), None, None)))
}

/// Reports grouped by category
#[utoipa::path(
    get,
    path = "/api/dashboard/categoria",
    tag = "dashboard",
    responses(
        (status = 200, description = "Reports per category", body = ApiResponse<Vec<CategoryCountDto>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_by_category(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<Vec<CategoryCountDto>>>, AppError> {
    let groups = service.by_category().await?;
    Ok(Json(ApiResponse::list(groups)))
}

/// Most voted reports
#[utoipa::path(
    get,
    path = "/api/dashboard/votos",
    tag = "dashboard",
    responses(
        (status = 200, description = "Top reports by votes", body = ApiResponse<Vec<ReportVotesDto>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_top_voted(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<Vec<ReportVotesDto>>>, AppError> {
    let reports = service.top_voted().await?;
    Ok(Json(ApiResponse::list(reports)))
}
