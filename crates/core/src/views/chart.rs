use chrono::DateTime;
use serde::Serialize;

use crate::models::history::PriceHistory;
use crate::models::timeframe::Timeframe;

pub const NO_CHART_DATA: &str = "No chart data available";

/// A line series ready for any charting front end.
///
/// Points are plotted exactly as received: one label and one value per
/// `(timestamp, price)` pair, in order, with no interpolation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn from_history(history: &PriceHistory, timeframe: Timeframe) -> Self {
        let labels = history
            .prices
            .iter()
            .map(|p| point_label(p.timestamp_ms, timeframe))
            .collect();
        let values = history.prices.iter().map(|p| p.price).collect();

        Self {
            title: format!("Price History ({timeframe})"),
            dataset_label: "Price (USD)".into(),
            labels,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// UTC time of day for intraday charts, otherwise the UTC date.
fn point_label(timestamp_ms: i64, timeframe: Timeframe) -> String {
    let Some(dt) = DateTime::from_timestamp_millis(timestamp_ms) else {
        return timestamp_ms.to_string();
    };
    match timeframe {
        Timeframe::Day => dt.format("%H:%M").to_string(),
        _ => dt.format("%Y-%m-%d").to_string(),
    }
}

/// What the chart area shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChartView {
    Loading,
    Empty,
    Series(ChartSeries),
}

impl ChartView {
    pub fn from_history(history: &PriceHistory, timeframe: Timeframe) -> Self {
        if history.is_empty() {
            ChartView::Empty
        } else {
            ChartView::Series(ChartSeries::from_history(history, timeframe))
        }
    }

    /// Placeholder text for the non-series states.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ChartView::Loading => None,
            ChartView::Empty => Some(NO_CHART_DATA),
            ChartView::Series(_) => None,
        }
    }
}
