//! Application state shared across all handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::Config;
use crate::database::TutorialRepository;

/// Application state shared across handlers.
///
/// Cloned per request; the repository is behind an `Arc` so every clone
/// talks to the same store.
#[derive(Clone)]
pub struct AppState {
    /// Tutorial persistence (PostgreSQL or in-memory)
    pub repository: Arc<dyn TutorialRepository>,
    /// Application configuration
    pub config: Config,
    /// Prometheus render handle, absent when metrics are disabled
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(repository: Arc<dyn TutorialRepository>, config: Config) -> Self {
        Self {
            repository,
            config,
            metrics_handle: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}

impl axum::extract::FromRef<AppState> for Arc<dyn TutorialRepository> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.repository.clone()
    }
}
