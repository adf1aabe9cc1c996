// =============================================================================
// Yahoo Finance chart client — unsigned v8 endpoint
// =============================================================================
//
// One GET per chart request, no caching, no retry. The endpoint returns the
// full history (`range=max`) as parallel arrays of timestamps and quotes;
// entries with a null close (halts, partial periods) are dropped before the
// series reaches the pipeline.
// =============================================================================

use std::time::Duration;

use chrono::{TimeZone, Utc};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::ChartError;
use crate::types::{Interval, PricePoint, PriceSeries};

/// Browser User-Agent sent with every request; Yahoo rejects the default
/// reqwest agent.
const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// A fetched history: the usable price series plus the instrument's display
/// name for the chart title (falls back to the symbol when Yahoo omits it).
#[derive(Debug, Clone)]
pub struct FetchedHistory {
    pub series: PriceSeries,
    pub display_name: String,
}

/// HTTP client for the Yahoo v8 finance chart endpoint.
#[derive(Debug, Clone)]
pub struct YahooClient {
    base_url: String,
    client: reqwest::Client,
}

impl YahooClient {
    /// Create a client with the given upstream request timeout.
    pub fn new(timeout: Duration) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            client,
        }
    }

    /// Fetch the full available close history for `symbol` at `interval`.
    ///
    /// Network errors, non-2xx statuses, unparseable bodies, and
    /// Yahoo-reported errors (unknown symbol) all map to
    /// [`ChartError::UpstreamFetch`]. A well-formed response with zero usable
    /// closes maps to [`ChartError::EmptyResult`] so the caller knows the
    /// fetch itself worked.
    #[instrument(skip(self), name = "yahoo::fetch_history")]
    pub async fn fetch_history(
        &self,
        symbol: &str,
        interval: Interval,
    ) -> Result<FetchedHistory, ChartError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        let resp = self
            .client
            .get(&url)
            .query(&[("range", "max"), ("interval", interval.yahoo_code())])
            .send()
            .await
            .map_err(|e| upstream(symbol, format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(upstream(symbol, format!("HTTP {status}")));
        }

        let body: ChartResponse = resp
            .json()
            .await
            .map_err(|e| upstream(symbol, format!("unparseable response: {e}")))?;

        let history = parse_chart(symbol, interval, body)?;
        debug!(
            symbol,
            interval = %interval,
            points = history.series.len(),
            "history fetched"
        );
        Ok(history)
    }
}

fn upstream(symbol: &str, reason: String) -> ChartError {
    ChartError::UpstreamFetch {
        symbol: symbol.to_string(),
        reason,
    }
}

// =============================================================================
// Response shape — v8/finance/chart
// =============================================================================

#[derive(Deserialize, Debug)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Deserialize, Debug)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartApiError>,
}

#[derive(Deserialize, Debug)]
struct ChartApiError {
    description: String,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Deserialize, Debug)]
struct ChartMeta {
    symbol: String,
    #[serde(rename = "shortName")]
    short_name: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Deserialize, Debug)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Turn the parallel-array chart payload into an ordered `PriceSeries`.
fn parse_chart(
    symbol: &str,
    interval: Interval,
    body: ChartResponse,
) -> Result<FetchedHistory, ChartError> {
    if let Some(err) = body.chart.error {
        return Err(upstream(symbol, err.description));
    }

    let result = body
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or_else(|| upstream(symbol, "response contained no result".to_string()))?;

    let quote = result
        .indicators
        .quote
        .first()
        .ok_or_else(|| upstream(symbol, "response contained no quote data".to_string()))?;

    let mut series = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let close = quote.close.get(i).copied().flatten();
        let time = Utc.timestamp_opt(ts, 0).single();
        if let (Some(close), Some(time)) = (close, time) {
            series.push(PricePoint { time, close });
        }
    }

    if series.is_empty() {
        return Err(ChartError::EmptyResult {
            symbol: symbol.to_string(),
            interval,
            window: 0,
        });
    }

    let display_name = result
        .meta
        .short_name
        .unwrap_or_else(|| result.meta.symbol.clone());

    Ok(FetchedHistory {
        series,
        display_name,
    })
}
