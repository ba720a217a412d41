pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod models;
pub mod triage;

use tracing_subscriber::EnvFilter;

use crate::api::{start_api_server_on, ApiContext, ServerError};
use crate::config::AppConfig;

/// Start the portal and serve until Ctrl-C.
pub async fn run() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env()?;
    let ctx = ApiContext::from_config(&config)?;

    let mut server = start_api_server_on(ctx, config.bind_addr).await?;
    tracing::info!(addr = %server.session.server_addr, "Serving patient portal API");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }

    server.shutdown();
    server.stopped().await
}
