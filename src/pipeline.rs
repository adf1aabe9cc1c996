// =============================================================================
// Indicator Pipeline — column computation, merge, and leading-row trim
// =============================================================================
//
// A pure, stateless, single-pass transformation: price series in, aligned
// indicator table out. No retries and no partial results — either the whole
// table is produced or the request fails with a tagged error.
// =============================================================================

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ChartError;
use crate::indicators::{momentum, rsi, sma};
use crate::types::{closes, Interval, PricePoint};

/// Window length for the RSI panel. Fixed at the conventional 14 periods.
pub const RSI_PERIOD: usize = 14;

/// Parameters of one pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorParams {
    /// Trailing window for the moving average. Must be positive.
    pub ma_window: usize,
    /// Whether the RSI column (and chart panel) is requested.
    pub with_rsi: bool,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ma_window: 200,
            with_rsi: true,
        }
    }
}

/// One derived record, keyed by timestamp and aligned with the input series.
///
/// `momentum` is only ever defined where `ma` is defined and non-zero; `rsi`
/// is `None` when the column was not requested or history is insufficient.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorRow {
    pub time: DateTime<Utc>,
    pub close: f64,
    pub ma: Option<f64>,
    pub momentum: Option<f64>,
    pub rsi: Option<f64>,
}

/// The pipeline output: ordered rows whose first element has every requested
/// column defined.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorTable {
    pub rows: Vec<IndicatorRow>,
}

/// Run the full pipeline over `series`.
///
/// Steps, in order:
/// 1. Reject `ma_window == 0` before touching the data.
/// 2. Compute the moving average, momentum ratio, and (if requested) RSI,
///    each index-aligned with the input.
/// 3. Merge the columns into rows and drop every leading row until all
///    requested columns are simultaneously defined.
/// 4. An empty post-trim table is reported as [`ChartError::EmptyResult`] so
///    the caller can distinguish "window too large" from a fetch failure.
///
/// The `symbol` and `interval` arguments only label the error values; the
/// arithmetic never depends on them.
pub fn compute_table(
    series: &[PricePoint],
    params: &IndicatorParams,
    symbol: &str,
    interval: Interval,
) -> Result<IndicatorTable, ChartError> {
    if params.ma_window == 0 {
        return Err(ChartError::InvalidParameter(
            "ma must be a positive integer".to_string(),
        ));
    }

    let close_col = closes(series);
    let ma_col = sma::moving_average(&close_col, params.ma_window);
    let momentum_col = momentum::momentum_ratio(&close_col, &ma_col);
    let rsi_col = if params.with_rsi {
        rsi::rsi(&close_col, RSI_PERIOD)
    } else {
        vec![None; close_col.len()]
    };

    let rows: Vec<IndicatorRow> = series
        .iter()
        .enumerate()
        .map(|(i, point)| IndicatorRow {
            time: point.time,
            close: point.close,
            ma: ma_col[i],
            momentum: momentum_col[i],
            rsi: rsi_col[i],
        })
        .collect();

    // Drop-until-all-defined: keep from the first row where every requested
    // column is present. Later gaps (e.g. momentum over a zero MA) stay as
    // nulls in their rows.
    let first_complete = rows.iter().position(|row| {
        row.ma.is_some() && row.momentum.is_some() && (!params.with_rsi || row.rsi.is_some())
    });

    match first_complete {
        Some(start) => Ok(IndicatorTable {
            rows: rows[start..].to_vec(),
        }),
        None => Err(ChartError::EmptyResult {
            symbol: symbol.to_string(),
            interval,
            window: params.ma_window,
        }),
    }
}
