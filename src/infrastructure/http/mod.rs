pub mod request_id;

use axum::{middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::controllers::{generate::GenerateController, health};
use crate::infrastructure::config::Config;
use self::request_id::request_id_middleware;

/// Build the application router.
///
/// Unmatched paths fall through to the static frontend directory, so `/`
/// serves the index page while `/generate` and the health endpoints stay
/// owned by the API.
pub fn build_router(config: &Config, generate_controller: Arc<GenerateController>) -> Router {
    // The frontend is plain static files; permissive CORS keeps the endpoint
    // usable from locally served copies of it during development.
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(generate_controller.clone());

    let generate_routes = Router::new()
        .route("/generate", post(GenerateController::generate))
        .with_state(generate_controller);

    Router::new()
        .merge(health_routes)
        .merge(generate_routes)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    generate_controller: Arc<GenerateController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(&config, generate_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
