use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Create public dashboard routes
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/dashboard/reportes", get(handlers::get_report_counts))
        .route("/api/dashboard/usuario", get(handlers::get_user_count))
        .route("/api/dashboard/categoria", get(handlers::get_by_category))
        .route("/api/dashboard/votos", get(handlers::get_top_voted))
        .with_state(dashboard_service)
}
