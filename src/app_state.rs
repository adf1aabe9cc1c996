// =============================================================================
// Application State
// =============================================================================
//
// Everything a request handler needs, shared via `Arc<AppState>`. The state
// is immutable after startup: requests are independent and nothing is cached
// between them, so there are no locks here.
// =============================================================================

use std::time::Duration;

use crate::runtime_config::ServiceConfig;
use crate::yahoo::YahooClient;

/// Process-wide immutable state: the startup configuration and the upstream
/// data-source client.
pub struct AppState {
    pub config: ServiceConfig,
    pub yahoo: YahooClient,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        let yahoo = YahooClient::new(Duration::from_secs(config.fetch_timeout_secs));
        Self { config, yahoo }
    }
}
