//! Pull-up Tracker - Binary Entry Point
//!
//! Loads `.env`, reads configuration, and serves the HTTP API.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use pullup_tracker::api::http::create_router;
use pullup_tracker::api::websocket::state::AppState;
use pullup_tracker::logging::init_logging;
use pullup_tracker::{LogStore, TrackerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal outside development
    dotenvy::dotenv().ok();

    let config = TrackerConfig::from_env().context("invalid configuration")?;
    init_logging(&config.logging)?;

    let store = Arc::new(LogStore::new());
    let state = Arc::new(AppState::from_config(store, &config)?);
    let app = create_router(state);

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, zone = %config.calendar.zone(), week_start = ?config.calendar.week_start(), "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown requested");
}
