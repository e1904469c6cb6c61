use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::shared::constants::UPLOAD_BODY_LIMIT;

/// Public report, vote and comment reads
pub fn public_routes(state: ReportState) -> Router {
    Router::new()
        .route("/api/reporte", get(handlers::list_reports))
        .route("/api/reporte/{id}", get(handlers::get_report))
        .route(
            "/api/reporte/{id}/votos/{user_id}",
            get(handlers::get_vote_state),
        )
        .route(
            "/api/reporte/{id}/comentarios",
            get(handlers::list_comments),
        )
        .with_state(state)
}

/// Report submission, voting, commenting and the caller's own reports
pub fn protected_routes(state: ReportState) -> Router {
    Router::new()
        .route(
            "/api/reporte",
            post(handlers::create_report).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/reporte/{id}/votar", post(handlers::toggle_vote))
        .route(
            "/api/reporte/{id}/comentarios",
            post(handlers::create_comment),
        )
        .route("/api/MisReportes", get(handlers::list_my_reports))
        .route("/api/MisReportes/{id}", put(handlers::update_my_report))
        .with_state(state)
}
