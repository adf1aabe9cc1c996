// =============================================================================
// Service Configuration
// =============================================================================
//
// Startup settings for the chart service. Every field carries a serde default
// so an older or partial JSON file still deserialises; environment overrides
// are applied by `main` after loading. Nothing mutates the config at runtime,
// so there is no save path.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::Interval;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:3001".to_string()
}

fn default_ticker() -> String {
    "SPY".to_string()
}

fn default_ma_window() -> usize {
    200
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

// =============================================================================
// ServiceConfig
// =============================================================================

/// Top-level configuration for the structural momentum service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Ticker used when a chart request omits the `ticker` parameter.
    #[serde(default = "default_ticker")]
    pub default_ticker: String,

    /// Moving-average window used when the `ma` parameter is omitted.
    #[serde(default = "default_ma_window")]
    pub default_ma_window: usize,

    /// Sampling interval used when the `interval` parameter is omitted.
    #[serde(default)]
    pub default_interval: Interval,

    /// Timeout for the upstream Yahoo fetch, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            default_ticker: default_ticker(),
            default_ma_window: default_ma_window(),
            default_interval: Interval::Daily,
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read service config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse service config from {}", path.display()))?;

        info!(
            path = %path.display(),
            bind_addr = %config.bind_addr,
            default_ticker = %config.default_ticker,
            default_ma_window = config.default_ma_window,
            "service config loaded"
        );

        Ok(config)
    }
}
