// =============================================================================
// Error taxonomy for the chart request path
// =============================================================================
//
// Every request either produces a full indicator table or fails with exactly
// one of these variants. All three are terminal: no retry, no partial chart.
// The HTTP mapping lives here so handlers can return `ChartError` directly.
// =============================================================================

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::warn;

use crate::types::Interval;

/// Failure modes of a chart request, kept distinct so the caller can render
/// distinct user-facing messages.
#[derive(Error, Debug)]
pub enum ChartError {
    /// A request parameter was rejected before any computation began
    /// (non-positive window, unrecognized interval).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The upstream data source could not produce a series (network error,
    /// bad response, unknown symbol). Never silently treated as empty data.
    #[error("upstream fetch failed for {symbol}: {reason}")]
    UpstreamFetch { symbol: String, reason: String },

    /// The fetch succeeded but zero usable rows remain after trimming, e.g.
    /// the window is larger than the available history. Reducing the window
    /// may help; retrying the fetch will not.
    #[error("no data for {symbol} at {interval} interval after applying a {window}-period window")]
    EmptyResult {
        symbol: String,
        interval: Interval,
        window: usize,
    },
}

impl IntoResponse for ChartError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamFetch { .. } => StatusCode::BAD_GATEWAY,
            Self::EmptyResult { .. } => StatusCode::NOT_FOUND,
        };

        let message = self.to_string();
        warn!(status = %status, "chart request failed: {message}");

        let body = Json(serde_json::json!({ "error": message }));
        (status, body).into_response()
    }
}
