use crate::api::{handlers, AppState};
use crate::config::ServerConfig;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};

/// GitHub caps webhook payloads at 25 MB
const MAX_WEBHOOK_BYTES: usize = 25 * 1024 * 1024;

/// Build the main API router
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        .route("/health/live", get(handlers::health_check))
        // Webhook ingestion
        .route(&server.webhook_path, post(handlers::receive_webhook))
        // Prometheus exposition
        .route(&server.metrics_path, get(handlers::metrics))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_WEBHOOK_BYTES))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
}
