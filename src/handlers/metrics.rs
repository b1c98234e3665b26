// Prometheus scrape endpoint

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{app_state::AppState, error::ApiError};

/// Prometheus metrics endpoint
///
/// # Errors
///
/// Returns 503 when the recorder was not installed (`METRICS_ENABLED=false`).
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "metrics",
    summary = "Prometheus metrics",
    responses(
        (status = 200, description = "Prometheus metrics", content_type = "text/plain"),
        (status = 503, description = "Metrics are disabled")
    )
)]
pub async fn get_prometheus_metrics(State(state): State<AppState>) -> Result<Response, ApiError> {
    let handle = state
        .metrics_handle
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("Metrics are disabled".to_string()))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
        .into_response())
}
