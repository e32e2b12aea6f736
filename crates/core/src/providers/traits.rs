use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::asset::Asset;
use crate::models::history::PriceHistory;

/// Trait abstraction for upstream market-data APIs.
///
/// The proxy and the in-process dashboard only ever talk to this trait,
/// so the concrete API (CoinGecko today) can be swapped in one place.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Current quote snapshot for the given ids, ordered by market cap.
    async fn list_assets(&self, ids: &[String]) -> Result<Vec<Asset>, CoreError>;

    /// The `limit` largest assets by market cap.
    async fn top_assets(&self, limit: u32) -> Result<Vec<Asset>, CoreError>;

    /// `(timestamp, price)` series for one asset over the last `days` days.
    async fn price_history(&self, id: &str, days: u32) -> Result<PriceHistory, CoreError>;
}

/// Which kind of currency pair a rate provider can price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateRoute {
    /// At least one side of the pair is a cryptocurrency
    Crypto,
    /// Both sides are fiat currencies
    Fiat,
}

impl std::fmt::Display for RateRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateRoute::Crypto => write!(f, "crypto rates"),
            RateRoute::Fiat => write!(f, "fiat rates"),
        }
    }
}

/// Trait abstraction for exchange-rate APIs used by the converter.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RateProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Which pair kinds this provider can price.
    fn supported_routes(&self) -> Vec<RateRoute>;

    /// Units of `to` per one unit of `from` (codes like "BTC", "USD").
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64, CoreError>;
}
