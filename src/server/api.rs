use crate::server::{AppState, SharedAggregator};
use crate::services::SourceCacheStats;
use axum::{
    extract::State,
    http::{header::CACHE_CONTROL, HeaderValue, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

const MISSING_PAGE: &str =
    "<h1>Dashboard not found</h1><p>index.html is missing from the public directory.</p>";

/// GET / - Serve the dashboard page shell
#[instrument(skip(app_state))]
pub async fn index_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    let index_path = app_state.public_dir.join("index.html");

    match tokio::fs::read_to_string(&index_path).await {
        Ok(html) => {
            debug!("Serving dashboard from {}", index_path.display());
            Html(html).into_response()
        }
        Err(e) => {
            warn!(error = %e, path = %index_path.display(), "Failed to read index.html");
            (StatusCode::NOT_FOUND, Html(MISSING_PAGE)).into_response()
        }
    }
}

/// GET /api/data - Aggregated BTC data
///
/// Always answers 200; upstream failures show up as fallback values and empty lists.
#[instrument(skip(aggregator))]
pub async fn data_handler(State(aggregator): State<SharedAggregator>) -> impl IntoResponse {
    let started = std::time::Instant::now();
    let data = aggregator.collect().await;

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        transactions = data.transactions.len(),
        "Serving /api/data"
    );

    (
        StatusCode::OK,
        [(CACHE_CONTROL, HeaderValue::from_static("no-store"))],
        Json(data),
    )
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
    pub current_system_time: String,
    pub caches: SourceCacheStats,
}

/// GET /health - Liveness and cache statistics
#[instrument(skip(app_state))]
pub async fn health_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    let health = HealthResponse {
        status: "ok",
        uptime_secs: app_state.started_at.elapsed().as_secs(),
        current_system_time: Utc::now().to_rfc3339(),
        caches: app_state.aggregator.cache_stats().await,
    };

    (StatusCode::OK, Json(health))
}
