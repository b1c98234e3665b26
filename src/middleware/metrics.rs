use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, gauge, histogram};
use std::time::Instant;

/// Metrics middleware that tracks request metrics
///
/// Labels use the matched route template (`/api/tutorials/{id}`) so ids do
/// not blow up label cardinality.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = route_label(&request);
    let start = Instant::now();

    gauge!("http_requests_in_flight", "path" => path.clone()).increment(1.0);
    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone())
        .increment(1);

    let response = next.run(request).await;

    let status = response.status();
    let duration = start.elapsed();

    gauge!("http_requests_in_flight", "path" => path.clone()).decrement(1.0);

    histogram!(
        "http_request_duration_seconds",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.as_u16().to_string()
    )
    .record(duration.as_secs_f64());

    counter!(
        "http_responses_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);

    if status.is_server_error() {
        counter!(
            "http_errors_total",
            "method" => method,
            "path" => path,
            "status" => status.as_u16().to_string()
        )
        .increment(1);
    }

    response
}

fn route_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string())
}

/// Track repository operations
pub fn track_repository_operation(operation: &str, duration_ms: f64, success: bool) {
    histogram!(
        "repository_operation_duration_ms",
        "operation" => operation.to_string(),
        "success" => success.to_string()
    )
    .record(duration_ms);

    counter!(
        "repository_operations_total",
        "operation" => operation.to_string(),
        "success" => success.to_string()
    )
    .increment(1);
}
