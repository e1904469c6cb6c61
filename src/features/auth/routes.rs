use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{routing::post, Router};
use std::sync::Arc;

/// Public auth routes (no authentication required)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/usuario", post(handlers::register))
        .route("/api/usuario/login", post(handlers::login))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use crate::shared::test_helpers::test_server;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_register_with_whitespace_name_is_rejected() {
        let server = test_server();
        let response = server
            .post("/api/usuario")
            .json(&json!({
                "nombreCompleto": "   ",
                "correo": "vecina@correo.pe",
                "contrasena": "secreta123"
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["message"],
            "Todos los campos son requeridos"
        );
    }

    #[tokio::test]
    async fn test_login_with_whitespace_email_is_rejected() {
        let server = test_server();
        let response = server
            .post("/api/usuario/login")
            .json(&json!({ "email": "  ", "password": "secreta123" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["message"],
            "Correo y contraseña requeridos"
        );
    }
}
