use serde::{Deserialize, Serialize};

/// A single `(timestamp, price)` sample.
///
/// Serialized as a two-element JSON array `[timestamp_ms, price]`, the shape
/// CoinGecko's `market_chart` endpoint uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(i64, f64)")]
pub struct PricePoint {
    /// Unix timestamp in milliseconds
    pub timestamp_ms: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp_ms: i64, price: f64) -> Self {
        Self {
            timestamp_ms,
            price,
        }
    }
}

// Upstream timestamps are JSON numbers that occasionally carry a fraction.
impl From<(f64, f64)> for PricePoint {
    fn from((ts, price): (f64, f64)) -> Self {
        Self {
            timestamp_ms: ts as i64,
            price,
        }
    }
}

impl From<PricePoint> for (i64, f64) {
    fn from(p: PricePoint) -> Self {
        (p.timestamp_ms, p.price)
    }
}

/// Price history of one asset over a lookback window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub prices: Vec<PricePoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_caps: Option<Vec<PricePoint>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_volumes: Option<Vec<PricePoint>>,
}

impl PriceHistory {
    pub fn from_prices(prices: Vec<PricePoint>) -> Self {
        Self {
            prices,
            market_caps: None,
            total_volumes: None,
        }
    }

    /// Order every series by timestamp. Stable, so equal timestamps keep
    /// their upstream order; no points are added or removed.
    pub fn sort_by_timestamp(&mut self) {
        self.prices.sort_by_key(|p| p.timestamp_ms);
        if let Some(caps) = self.market_caps.as_mut() {
            caps.sort_by_key(|p| p.timestamp_ms);
        }
        if let Some(volumes) = self.total_volumes.as_mut() {
            volumes.sort_by_key(|p| p.timestamp_ms);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
