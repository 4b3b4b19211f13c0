pub mod api;

use crate::error::AppError;
use crate::services::Aggregator;
use axum::{extract::FromRef, http::Method, routing::get, Router};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};

pub type SharedAggregator = Arc<Aggregator>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub aggregator: SharedAggregator,
    pub public_dir: PathBuf,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(aggregator: SharedAggregator, public_dir: PathBuf) -> Self {
        Self {
            aggregator,
            public_dir,
            started_at: Instant::now(),
        }
    }
}

impl FromRef<AppState> for SharedAggregator {
    fn from_ref(app_state: &AppState) -> SharedAggregator {
        app_state.aggregator.clone()
    }
}

/// Routes: `/`, `/api/data`, `/health`
pub fn router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(api::index_handler))
        .route("/api/data", get(api::data_handler))
        .route("/health", get(api::health_handler))
        .layer(cors)
        .with_state(app_state)
}

/// Start the axum server
pub async fn serve(app_state: AppState, port: u16) -> Result<(), AppError> {
    tracing::info!("Starting whalewatch server");
    tracing::info!("Using public directory: {}", app_state.public_dir.display());

    tracing::info!("Registering routes:");
    tracing::info!("  GET /");
    tracing::info!("  GET /api/data");
    tracing::info!("  GET /health");

    let app = router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
