// =============================================================================
// Chart rendering — Plotly figure JSON + HTML page assembly
// =============================================================================
//
// The figure is built once from the indicator table and handed to plotly.js
// (loaded from the CDN) on the client. Three stacked panels share one x-axis:
// price + dashed MA on top, normalized momentum in the middle, RSI pinned to
// [0, 100] at the bottom. The RSI panel is omitted when the column was not
// requested. Undefined values serialise as JSON nulls, which plotly renders
// as gaps.
// =============================================================================

use serde_json::{json, Value};

use crate::pipeline::{IndicatorTable, RSI_PERIOD};

/// Everything the renderer needs besides the table itself.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    /// Upper-cased ticker symbol, e.g. "SPY".
    pub ticker: String,
    /// Instrument display name from the data source, e.g. "SPDR S&P 500".
    pub display_name: String,
    /// Moving-average window, for the trace label.
    pub ma_window: usize,
    /// Whether the RSI panel is included.
    pub with_rsi: bool,
}

/// Build the Plotly figure (`{"data": [...], "layout": {...}}`) for a
/// computed indicator table.
pub fn figure(table: &IndicatorTable, spec: &ChartSpec) -> Value {
    let dates: Vec<String> = table
        .rows
        .iter()
        .map(|r| r.time.format("%Y-%m-%d").to_string())
        .collect();
    let closes: Vec<Value> = table.rows.iter().map(|r| json!(r.close)).collect();
    let ma: Vec<Value> = table.rows.iter().map(|r| json!(r.ma)).collect();
    let momentum: Vec<Value> = table.rows.iter().map(|r| json!(r.momentum)).collect();

    let mut data = vec![
        json!({
            "type": "scatter",
            "mode": "lines",
            "x": dates,
            "y": closes,
            "name": format!("{} Close", spec.ticker),
            "line": { "color": "black", "width": 2 },
        }),
        json!({
            "type": "scatter",
            "mode": "lines",
            "x": dates,
            "y": ma,
            "name": format!("{}-Period MA", spec.ma_window),
            "line": { "color": "blue", "width": 2, "dash": "dash" },
        }),
        json!({
            "type": "scatter",
            "mode": "lines",
            "x": dates,
            "y": momentum,
            "name": "Normalized Momentum",
            "yaxis": "y2",
            "line": { "color": "darkred", "width": 2 },
        }),
    ];

    if spec.with_rsi {
        let rsi: Vec<Value> = table.rows.iter().map(|r| json!(r.rsi)).collect();
        data.push(json!({
            "type": "scatter",
            "mode": "lines",
            "x": dates,
            "y": rsi,
            "name": format!("{RSI_PERIOD}-period RSI"),
            "yaxis": "y3",
            "line": { "color": "green", "width": 2 },
        }));
    }

    json!({ "data": data, "layout": layout(spec) })
}

/// Panel geometry and styling. Row heights follow the 0.6 / 0.2 / 0.2 split
/// with 0.05 spacing when the RSI panel is present, and 0.75 / 0.25 without.
fn layout(spec: &ChartSpec) -> Value {
    let mut annotations = vec![panel_title(
        "Normalized Momentum",
        if spec.with_rsi { 0.41 } else { 0.25 },
    )];
    if spec.with_rsi {
        annotations.push(panel_title(&format!("RSI ({RSI_PERIOD}-period)"), 0.18));
    }

    let mut layout = json!({
        "title": {
            "text": format!("<b>{} ({})</b>", spec.ticker, spec.display_name),
            "font": { "size": 36, "color": "black" },
            "x": 0.5,
            "xanchor": "center",
            "y": 0.95,
            "yanchor": "top",
        },
        "showlegend": true,
        "hovermode": "x unified",
        "paper_bgcolor": "white",
        "plot_bgcolor": "white",
        "xaxis": {
            "domain": [0.0, 1.0],
            "anchor": if spec.with_rsi { "y3" } else { "y2" },
            "title": { "text": "Date" },
        },
        "annotations": annotations,
    });

    if spec.with_rsi {
        layout["yaxis"] = json!({ "domain": [0.46, 1.0], "title": { "text": "Price" } });
        layout["yaxis2"] =
            json!({ "domain": [0.23, 0.41], "title": { "text": "Momentum" }, "anchor": "x" });
        layout["yaxis3"] = json!({
            "domain": [0.0, 0.18],
            "range": [0, 100],
            "title": { "text": "RSI" },
            "anchor": "x",
        });
    } else {
        layout["yaxis"] = json!({ "domain": [0.3, 1.0], "title": { "text": "Price" } });
        layout["yaxis2"] =
            json!({ "domain": [0.0, 0.25], "title": { "text": "Momentum" }, "anchor": "x" });
    }

    layout
}

/// Bold centered caption sitting just above a panel's top edge.
fn panel_title(text: &str, y: f64) -> Value {
    json!({
        "text": format!("<b>{text}</b>"),
        "font": { "size": 24 },
        "x": 0.5,
        "y": y,
        "xref": "paper",
        "yref": "paper",
        "xanchor": "center",
        "yanchor": "bottom",
        "showarrow": false,
    })
}

/// Wrap the figure in a full HTML page: CDN-loaded plotly.js, a full-viewport
/// plot container, and the enlarged-modebar styling.
pub fn render_page(table: &IndicatorTable, spec: &ChartSpec) -> String {
    let figure = figure(table, spec);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1"/>
<title>{ticker} — Structural Momentum</title>
<script src="https://cdn.plot.ly/plotly-2.32.0.min.js"></script>
<style>
    html, body {{
        margin: 0;
        padding: 0;
        height: 100%;
    }}
    .modebar {{
        transform: scale(1.8);
        transform-origin: top right;
    }}
    .modebar-btn {{
        padding: 12px !important;
        margin: 4px !important;
    }}
    #chart {{
        height: 100vh;
    }}
</style>
</head>
<body>
<div id="chart"></div>
<script>
    const figure = {figure};
    Plotly.newPlot("chart", figure.data, figure.layout, {{ responsive: true }});
</script>
</body>
</html>
"#,
        ticker = spec.ticker,
        figure = figure,
    )
}
