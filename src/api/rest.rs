// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// Three routes: a usage hint at `/`, the chart itself at `/chart`, and a
// JSON liveness probe at `/api/v1/health`. Every chart request is fully
// self-contained: parse parameters, fetch the series, run the pipeline,
// render the page. Failures surface as the tagged `ChartError` variants so
// the client can tell a bad parameter from a dead upstream from a window
// larger than the available history.
//
// CORS is configured permissively for development; tighten `allowed_origins`
// in production.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::app_state::AppState;
use crate::chart::{render_page, ChartSpec};
use crate::error::ChartError;
use crate::pipeline::{compute_table, IndicatorParams};
use crate::runtime_config::ServiceConfig;
use crate::types::Interval;

// =============================================================================
// Router construction
// =============================================================================

/// Build the REST router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/chart", get(chart))
        .route("/api/v1/health", get(health))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Home
// =============================================================================

async fn home() -> &'static str {
    "Backend is working! Visit /chart?ticker=SPY&ma=200&interval=1d"
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    server_time: i64,
}

async fn health() -> impl IntoResponse {
    axum::Json(HealthResponse {
        status: "ok",
        server_time: chrono::Utc::now().timestamp_millis(),
    })
}

// =============================================================================
// Chart
// =============================================================================

/// Raw query parameters of a chart request. All optional; parsing and
/// validation happen in [`resolve`] so malformed values produce an
/// `InvalidParameter` message instead of a framework rejection.
#[derive(Debug, Default, Deserialize)]
struct ChartQuery {
    #[serde(default)]
    ticker: Option<String>,
    #[serde(default)]
    ma: Option<String>,
    #[serde(default)]
    interval: Option<String>,
    #[serde(default)]
    rsi: Option<String>,
}

/// A fully validated chart request.
#[derive(Debug, Clone, PartialEq)]
struct ChartRequest {
    ticker: String,
    ma_window: usize,
    interval: Interval,
    with_rsi: bool,
}

/// Validate raw query parameters against the configured defaults. Rejected
/// values never reach the fetch or the pipeline.
fn resolve(query: &ChartQuery, config: &ServiceConfig) -> Result<ChartRequest, ChartError> {
    let ticker = query
        .ticker
        .as_deref()
        .unwrap_or(&config.default_ticker)
        .trim()
        .to_uppercase();
    if ticker.is_empty() {
        return Err(ChartError::InvalidParameter(
            "ticker must not be empty".to_string(),
        ));
    }

    let ma_window = match query.ma.as_deref() {
        None => config.default_ma_window,
        Some(raw) => raw.trim().parse::<usize>().ok().filter(|&w| w > 0).ok_or_else(|| {
            ChartError::InvalidParameter(format!("ma must be a positive integer, got '{raw}'"))
        })?,
    };

    let interval = match query.interval.as_deref() {
        None => config.default_interval,
        Some(raw) => Interval::parse(raw).ok_or_else(|| {
            ChartError::InvalidParameter(format!(
                "interval must be one of daily/1d, weekly/1wk, monthly/1mo, got '{raw}'"
            ))
        })?,
    };

    let with_rsi = match query.rsi.as_deref() {
        None => true,
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            _ => {
                return Err(ChartError::InvalidParameter(format!(
                    "rsi must be true or false, got '{raw}'"
                )))
            }
        },
    };

    Ok(ChartRequest {
        ticker,
        ma_window,
        interval,
        with_rsi,
    })
}

async fn chart(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> Result<Html<String>, ChartError> {
    let request = resolve(&query, &state.config)?;
    info!(
        ticker = %request.ticker,
        ma = request.ma_window,
        interval = %request.interval,
        rsi = request.with_rsi,
        "chart requested"
    );

    let history = state
        .yahoo
        .fetch_history(&request.ticker, request.interval)
        .await?;

    let params = IndicatorParams {
        ma_window: request.ma_window,
        with_rsi: request.with_rsi,
    };
    let table = compute_table(&history.series, &params, &request.ticker, request.interval)?;

    let spec = ChartSpec {
        ticker: request.ticker,
        display_name: history.display_name,
        ma_window: request.ma_window,
        with_rsi: request.with_rsi,
    };
    Ok(Html(render_page(&table, &spec)))
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn query(ticker: Option<&str>, ma: Option<&str>, interval: Option<&str>, rsi: Option<&str>) -> ChartQuery {
        ChartQuery {
            ticker: ticker.map(String::from),
            ma: ma.map(String::from),
            interval: interval.map(String::from),
            rsi: rsi.map(String::from),
        }
    }

    #[test]
    fn resolve_applies_configured_defaults() {
        let cfg = ServiceConfig::default();
        let req = resolve(&ChartQuery::default(), &cfg).unwrap();
        assert_eq!(
            req,
            ChartRequest {
                ticker: "SPY".to_string(),
                ma_window: 200,
                interval: Interval::Daily,
                with_rsi: true,
            }
        );
    }

    #[test]
    fn resolve_uppercases_ticker() {
        let cfg = ServiceConfig::default();
        let req = resolve(&query(Some("spy"), None, None, None), &cfg).unwrap();
        assert_eq!(req.ticker, "SPY");
    }

    #[test]
    fn resolve_rejects_zero_window() {
        let cfg = ServiceConfig::default();
        let err = resolve(&query(None, Some("0"), None, None), &cfg).unwrap_err();
        assert!(matches!(err, ChartError::InvalidParameter(_)));
    }

    #[test]
    fn resolve_rejects_non_numeric_window() {
        let cfg = ServiceConfig::default();
        let err = resolve(&query(None, Some("two hundred"), None, None), &cfg).unwrap_err();
        assert!(matches!(err, ChartError::InvalidParameter(_)));
    }

    #[test]
    fn resolve_rejects_unknown_interval() {
        let cfg = ServiceConfig::default();
        let err = resolve(&query(None, None, Some("hourly"), None), &cfg).unwrap_err();
        assert!(matches!(err, ChartError::InvalidParameter(_)));
    }

    #[test]
    fn resolve_accepts_spec_and_yahoo_interval_names() {
        let cfg = ServiceConfig::default();
        let weekly = resolve(&query(None, None, Some("weekly"), None), &cfg).unwrap();
        assert_eq!(weekly.interval, Interval::Weekly);
        let monthly = resolve(&query(None, None, Some("1mo"), None), &cfg).unwrap();
        assert_eq!(monthly.interval, Interval::Monthly);
    }

    #[test]
    fn resolve_parses_rsi_toggle() {
        let cfg = ServiceConfig::default();
        assert!(!resolve(&query(None, None, None, Some("false")), &cfg).unwrap().with_rsi);
        assert!(resolve(&query(None, None, None, Some("1")), &cfg).unwrap().with_rsi);
        assert!(resolve(&query(None, None, None, Some("maybe")), &cfg).is_err());
    }

    #[test]
    fn resolve_rejects_blank_ticker() {
        let cfg = ServiceConfig::default();
        let err = resolve(&query(Some("   "), None, None, None), &cfg).unwrap_err();
        assert!(matches!(err, ChartError::InvalidParameter(_)));
    }
}
