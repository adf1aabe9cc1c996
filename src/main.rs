// =============================================================================
// Structural Momentum — Main Entry Point
// =============================================================================
//
// A small chart service: fetch a ticker's price history, compute the
// structural-momentum indicator table (trailing MA, normalized momentum,
// RSI), and serve it as an interactive three-panel chart.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod chart;
mod error;
mod indicators;
mod pipeline;
mod runtime_config;
mod types;
mod yahoo;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::runtime_config::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = ServiceConfig::load("service_config.json").unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        ServiceConfig::default()
    });

    if let Ok(addr) = std::env::var("MOMENTUM_BIND_ADDR") {
        config.bind_addr = addr;
    }
    if let Ok(ticker) = std::env::var("MOMENTUM_DEFAULT_TICKER") {
        let ticker = ticker.trim().to_uppercase();
        if !ticker.is_empty() {
            config.default_ticker = ticker;
        }
    }

    info!(
        bind_addr = %config.bind_addr,
        default_ticker = %config.default_ticker,
        default_ma_window = config.default_ma_window,
        "Structural Momentum starting"
    );

    // ── 2. Shared state & router ─────────────────────────────────────────
    let state = Arc::new(AppState::new(config));
    let app = api::rest::router(state.clone());

    // ── 3. Serve until Ctrl+C ────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&state.config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", state.config.bind_addr))?;
    info!(addr = %state.config.bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            warn!("Shutdown signal received — stopping gracefully");
        })
        .await
        .context("API server failed")?;

    info!("Structural Momentum shut down complete.");
    Ok(())
}
