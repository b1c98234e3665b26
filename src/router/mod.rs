//! Router configuration module

use std::time::Duration;

use axum::{http::StatusCode, middleware::from_fn, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::app_state::AppState;
use crate::constants::api::TUTORIALS_PATH;
use crate::handlers::{health, metrics, tutorials};
use crate::middleware::{add_security_headers, metrics_middleware, request_logger_middleware};
use crate::openapi::ApiDoc;

/// Build the application router.
pub fn build_router(app_state: AppState) -> Router {
    let request_timeout = Duration::from_secs(app_state.config.request_timeout);

    // Operational routes (always at root)
    let operations = Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::get_prometheus_metrics));

    let api = Router::new()
        .nest(TUTORIALS_PATH, tutorials::routes())
        .merge(operations)
        // Matched-path labels are only available inside route layers
        .route_layer(from_fn(metrics_middleware));

    api.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(request_logger_middleware))
                .layer(from_fn(add_security_headers))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
