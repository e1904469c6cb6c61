use crate::features::users::handlers;
use crate::features::users::services::UserService;
use crate::shared::constants::UPLOAD_BODY_LIMIT;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};
use std::sync::Arc;

/// Protected user routes. Registration and login are mounted by the auth feature.
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/usuario", get(handlers::list_users))
        .route("/api/usuario/{id}", put(handlers::update_profile))
        .route(
            "/api/usuario/{id}/foto",
            put(handlers::update_photo)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
                .delete(handlers::remove_photo),
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
    async fn test_list_users_requires_token() {
        let server = test_server();
        let response = server.get("/api/usuario").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["success"], false);
    }

    #[tokio::test]
    async fn test_cannot_edit_another_users_profile() {
        let server = test_server();
        let response = server
            .put("/api/usuario/2")
            .authorization_bearer(token_for(1, Role::Citizen))
            .json(&json!({ "fullName": "Intruso" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.json::<Value>()["message"],
            "No puedes editar el perfil de otro usuario"
        );
    }

    #[tokio::test]
    async fn test_admin_cannot_edit_another_users_profile() {
        let server = test_server();
        let response = server
            .put("/api/usuario/2")
            .authorization_bearer(token_for(1, Role::Administrator))
            .json(&json!({ "nombreCompleto": "Admin" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let server = test_server();
        let response = server
            .put("/api/usuario/1")
            .authorization_bearer(token_for(1, Role::Citizen))
            .json(&json!({ "fullName": "" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "El nombre es requerido");
    }

    #[tokio::test]
    async fn test_non_numeric_user_id_is_rejected() {
        let server = test_server();
        let response = server
            .put("/api/usuario/abc")
            .authorization_bearer(token_for(1, Role::Citizen))
            .json(&json!({ "fullName": "Ana" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "ID inválido");
    }

    #[tokio::test]
    async fn test_cannot_remove_another_users_photo() {
        let server = test_server();
        let response = server
            .delete("/api/usuario/5/foto")
            .authorization_bearer(token_for(6, Role::Citizen))
            .await;

        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_photo_upload_without_file() {
        let server = test_server();
        let form = axum_test::multipart::MultipartForm::new().add_text("fullName", "Ana");
        let response = server
            .put("/api/usuario/1/foto")
            .authorization_bearer(token_for(1, Role::Citizen))
            .multipart(form)
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "Archivo no recibido");
    }

    #[tokio::test]
    async fn test_whitespace_name_is_rejected() {
        let server = test_server();
        let response = server
            .put("/api/usuario/1")
            .authorization_bearer(token_for(1, Role::Citizen))
            .json(&json!({ "fullName": "   " }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "El nombre es requerido");
    }
}
