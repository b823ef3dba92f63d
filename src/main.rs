use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dota_compare::config::Config;
use dota_compare::web::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dota_compare=info,tower_http=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting dota-compare");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded (OpenDota: {})", config.opendota_api_url);

    let orchestrator = Arc::new(dota_compare::build_orchestrator(&config)?);
    info!("OpenDota client initialized");

    let state = AppState {
        orchestrator,
        default_limit: config.default_match_limit,
    };

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Listening on http://{}", config.bind_addr);

    let server = axum::serve(listener, web::router(state)).with_graceful_shutdown(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Shutdown signal received");
    });

    if let Err(e) = server.await {
        error!("Server exited unexpectedly: {}", e);
        return Err(e.into());
    }

    info!("Shutting down dota-compare");
    Ok(())
}
