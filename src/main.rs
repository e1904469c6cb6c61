mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::{AuthConfig, Config};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, error, middleware};
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::auth::routes as auth_routes;
use crate::features::auth::services::{AuthService, PasswordService, TokenService};
use crate::features::auth::JwtValidator;
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::reports::{
    routes as reports_routes, CommentService, ReportService, ReportState, VoteService,
};
use crate::features::users::{routes as users_routes, UserService};
use crate::modules::storage::{MediaStore, MinIOClient};
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, Router};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

/// Every API route, public and bearer-protected, over the given pool and media host
pub(crate) fn api_router(
    pool: PgPool,
    auth_config: &AuthConfig,
    media: Arc<dyn MediaStore>,
) -> Router {
    let jwt_validator = Arc::new(JwtValidator::new(
        &auth_config.jwt_secret,
        auth_config.jwt_leeway,
    ));

    let token_service = Arc::new(TokenService::new(auth_config));
    let auth_service = Arc::new(AuthService::new(
        pool.clone(),
        token_service,
        PasswordService::new(auth_config.bcrypt_cost),
    ));
    let user_service = Arc::new(UserService::new(pool.clone(), Arc::clone(&media)));
    let category_service = Arc::new(CategoryService::new(pool.clone()));
    let report_state = ReportState {
        report_service: Arc::new(ReportService::new(pool.clone(), media)),
        vote_service: Arc::new(VoteService::new(pool.clone())),
        comment_service: Arc::new(CommentService::new(pool.clone())),
    };
    let admin_service = Arc::new(AdminService::new(pool.clone()));
    let dashboard_service = Arc::new(DashboardService::new(pool));

    // Protected routes (require JWT authentication)
    let protected_routes = Router::new()
        .merge(users_routes::routes(user_service))
        .merge(categories_routes::protected_routes(Arc::clone(
            &category_service,
        )))
        .merge(reports_routes::protected_routes(report_state.clone()))
        .merge(admin_routes::routes(admin_service))
        .route_layer(axum::middleware::from_fn_with_state(
            jwt_validator,
            middleware::auth_middleware,
        ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(auth_routes::public_routes(auth_service))
        .merge(categories_routes::public_routes(category_service))
        .merge(reports_routes::public_routes(report_state))
        .merge(dashboard_routes::routes(dashboard_service));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .fallback(middleware::not_found_fallback)
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    error::expose_internal_errors(config.app.environment.is_development());

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!(
        "Configuration loaded successfully (environment: {:?})",
        config.app.environment
    );

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Initialize MinIO client for media uploads
    let minio_client = MinIOClient::new(config.minio.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize MinIO client: {}", e))?;
    tracing::info!(
        "MinIO client initialized for bucket: {}",
        minio_client.bucket_name()
    );
    let media: Arc<dyn MediaStore> = Arc::new(minio_client);

    let api = api_router(pool, &config.auth, media);
    tracing::info!("API routes initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    let app = Router::new()
        .merge(swagger)
        .merge(api)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::shared::test_helpers::test_server;
    use axum::http::StatusCode;
    use serde_json::Value;

    #[tokio::test]
    async fn test_health_needs_no_token() {
        let server = test_server();
        server.get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_unknown_route_uses_envelope() {
        let server = test_server();
        let response = server.get("/api/nada").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Ruta no encontrada");
    }

    #[tokio::test]
    async fn test_expired_or_foreign_token_is_rejected() {
        let server = test_server();
        let response = server
            .get("/api/MisReportes")
            .authorization_bearer("eyJhbGciOiJIUzI1NiJ9.e30.invalid")
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }
}
