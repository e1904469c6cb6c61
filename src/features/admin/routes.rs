use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create validation routes (all require administrator access)
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/api/validacionReportes", get(handlers::list_reports))
        .route(
            "/api/validacionReportes/{id}/estado",
            put(handlers::update_status),
        )
        .with_state(admin_service)
}
