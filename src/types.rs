// =============================================================================
// Shared types used across the structural momentum service
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sampling granularity of the requested price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    Daily,
    Weekly,
    Monthly,
}

impl Default for Interval {
    fn default() -> Self {
        Self::Daily
    }
}

impl Interval {
    /// Parse an interval from either its plain name ("daily") or the Yahoo
    /// interval code ("1d"). Case-insensitive. Returns `None` for anything
    /// outside the supported set so callers can reject it before fetching.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "1d" | "d" => Some(Self::Daily),
            "weekly" | "1wk" | "w" => Some(Self::Weekly),
            "monthly" | "1mo" | "m" => Some(Self::Monthly),
            _ => None,
        }
    }

    /// The interval code understood by the Yahoo chart endpoint.
    pub fn yahoo_code(&self) -> &'static str {
        match self {
            Self::Daily => "1d",
            Self::Weekly => "1wk",
            Self::Monthly => "1mo",
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.yahoo_code())
    }
}

/// One observation in a price series: a trading-period timestamp and the
/// period's closing price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: DateTime<Utc>,
    pub close: f64,
}

/// An ordered price series, strictly increasing in time, one entry per
/// trading period at the requested interval. Produced by the data source;
/// read-only to the pipeline.
pub type PriceSeries = Vec<PricePoint>;

/// Extract the close column from a series, preserving order.
pub fn closes(series: &[PricePoint]) -> Vec<f64> {
    series.iter().map(|p| p.close).collect()
}
