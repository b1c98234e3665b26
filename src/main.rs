use std::net::SocketAddr;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use tutorial_api::{
    config::Config,
    router::build_router,
    startup::{init_tracing, initialize_app, shutdown_signal},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(&config);
    info!("Loaded configuration for environment: {}", config.environment);

    let app_state = initialize_app(&config).await?;
    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("🌐 Tutorial API listening on {}", addr);
    info!("📚 Swagger UI available at http://{}/api/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
