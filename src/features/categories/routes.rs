use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Public category reads
pub fn public_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categoria", get(handlers::list_categories))
        .route("/api/categoria/{id}", get(handlers::get_category))
        .with_state(service)
}

/// Category management (administrators only)
pub fn protected_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categoria", post(handlers::create_category))
        .route(
            "/api/categoria/{id}",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use crate::features::auth::model::Role;
    use crate::shared::test_helpers::{test_server, token_for};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_citizen_cannot_create_category() {
        let server = test_server();
        let response = server
            .post("/api/categoria")
            .authorization_bearer(token_for(3, Role::Citizen))
            .json(&json!({ "name": "Baches" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.json::<Value>()["message"],
            "Acceso denegado. Se requiere rol de administrador."
        );
    }

    #[tokio::test]
    async fn test_delete_category_requires_token() {
        let server = test_server();
        let response = server.delete("/api/categoria/1").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_create_without_name_is_rejected() {
        let server = test_server();
        let response = server
            .post("/api/categoria")
            .authorization_bearer(token_for(1, Role::Administrator))
            .json(&json!({ "description": "sin nombre" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_admin_blank_name_is_rejected() {
        let server = test_server();
        let response = server
            .put("/api/categoria/1")
            .authorization_bearer(token_for(1, Role::Administrator))
            .json(&json!({ "nombre": "   " }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "El nombre es requerido");
    }

    #[tokio::test]
    async fn test_admin_create_with_whitespace_name_is_rejected() {
        let server = test_server();
        let response = server
            .post("/api/categoria")
            .authorization_bearer(token_for(1, Role::Administrator))
            .json(&json!({ "name": "   " }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "El nombre es requerido");
    }
}
