//! LIFF Points Relay - Main entry point

use anyhow::Context;
use liffpoints_networking::LineClient;
use liffpoints_relay::{build_router, load_relay_config, RelayState};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "liffpoints_relay=debug,liffpoints_networking=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LIFF Points relay");

    // Fail fast when the channel token is missing
    let config = load_relay_config(Path::new(".")).context("Invalid relay configuration")?;
    tracing::info!("Push API base: {}", config.line_api_base);

    let line = LineClient::from_config(&config).context("Failed to create push client")?;
    let app = build_router(RelayState::new(Arc::new(line)));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    tracing::info!("Relay listening on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
