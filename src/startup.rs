//! Application startup and initialization logic.

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::config::{Config, LogFormat, StorageBackend};
use crate::database::{self, InMemoryTutorialRepository, PgTutorialRepository, TutorialRepository};

const DEFAULT_LOG_FILTER: &str = "tutorial_api=debug,tower_http=debug";

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

/// Initialize the storage backend and metrics recorder, and create the AppState.
pub async fn initialize_app(config: &Config) -> Result<AppState> {
    info!(
        environment = %config.environment,
        storage_backend = %config.storage_backend,
        "🚀 Starting tutorial API"
    );

    let repository = initialize_repository(config).await?;
    let mut app_state = AppState::new(repository, config.clone());

    if config.metrics_enabled {
        let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;
        app_state = app_state.with_metrics(metrics_handle);
        info!("✅ Prometheus metrics initialized");
    } else {
        warn!("Metrics disabled; /metrics will answer 503");
    }

    info!("✅ AppState created successfully");
    Ok(app_state)
}

async fn initialize_repository(config: &Config) -> Result<Arc<dyn TutorialRepository>> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = database::setup_database(config).await?;
            info!("✅ PostgreSQL connection established");

            if config.run_migrations {
                database::run_migrations(&pool).await?;
                info!("✅ Database migrations completed");
            } else {
                info!("Skipping database migrations (RUN_MIGRATIONS=false)");
            }

            Ok(Arc::new(PgTutorialRepository::new(pool)))
        }
        StorageBackend::Memory => {
            if config.is_production() {
                warn!("In-memory storage in production: tutorials are lost on restart");
            }
            info!("✅ In-memory tutorial store initialized");
            Ok(Arc::new(InMemoryTutorialRepository::new()))
        }
    }
}

/// Wait for shutdown signal.
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully");
        },
    }
}
