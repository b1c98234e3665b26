use std::time::Instant;

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    pub environment: String,
    pub storage_backend: String,
    pub dependencies: Vec<ServiceHealth>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceHealth {
    pub name: String,
    pub status: String,
    pub response_time_ms: Option<u64>,
    pub last_check: chrono::DateTime<chrono::Utc>,
    /// Number of stored tutorials when the storage check succeeded
    pub record_count: Option<i64>,
    pub error_message: Option<String>,
}

impl HealthStatus {
    pub fn new(environment: &str, storage_backend: &str) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: environment.to_string(),
            storage_backend: storage_backend.to_string(),
            dependencies: Vec::new(),
        }
    }

    pub fn add_dependency_check(
        &mut self,
        name: &str,
        response_time: Option<u64>,
        outcome: Result<i64, String>,
    ) {
        let is_healthy = outcome.is_ok();
        let (record_count, error_message) = match outcome {
            Ok(count) => (Some(count), None),
            Err(e) => (None, Some(e)),
        };

        self.dependencies.push(ServiceHealth {
            name: name.to_string(),
            status: if is_healthy { "healthy" } else { "unhealthy" }.to_string(),
            response_time_ms: response_time,
            last_check: chrono::Utc::now(),
            record_count,
            error_message,
        });

        if !is_healthy {
            self.status = "degraded".to_string();
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Health check that also counts stored tutorials
///
/// Always answers 200; a failing store only flips the status to `degraded`.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health", body = HealthStatus)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let mut health = HealthStatus::new(
        &state.config.environment,
        &state.config.storage_backend.to_string(),
    );

    let started = Instant::now();
    let outcome = state.repository.count().await.map_err(|e| {
        tracing::warn!("Storage health check failed: {}", e);
        e.to_string()
    });
    let elapsed = started.elapsed().as_millis() as u64;

    health.add_dependency_check("storage", Some(elapsed), outcome);
    Json(health)
}
