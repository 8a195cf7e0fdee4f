use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::events::{parse_webhook, EVENT_HEADER};
use crate::models::DeliveryEvent;
use crate::webhook::{verify_signature, SIGNATURE_HEADER};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Receive a signed webhook delivery.
///
/// Push and workflow-run deliveries answer with the computed snapshot; a
/// ping answers `Pong!`; anything else is acknowledged with an empty body.
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());
    verify_signature(state.webhook_secret.as_bytes(), signature, &body)?;

    let event_type = headers
        .get(EVENT_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Validation(format!("missing {} header", EVENT_HEADER)))?;

    let event = parse_webhook(event_type, &body)?;

    if event == DeliveryEvent::Heartbeat {
        return Ok("Pong!".into_response());
    }

    match state.engine.handle_event(&event).await {
        Some(snapshot) => Ok(Json(snapshot).into_response()),
        None => Ok(StatusCode::OK.into_response()),
    }
}

/// Prometheus metrics endpoint
///
/// Returns the metrics store in Prometheus text exposition format
pub async fn metrics(State(state): State<AppState>) -> Result<Response> {
    let body = state.store.render()?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, state.store.content_type())],
        body,
    )
        .into_response())
}
