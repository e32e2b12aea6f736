use serde::{Deserialize, Deserializer, Serialize};

/// A tracked cryptocurrency and its quote snapshot.
///
/// Field names follow the CoinGecko `coins/markets` record so the proxy can
/// pass listings through unchanged. An `Asset` is never patched in place:
/// every refresh replaces the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Stable key (e.g., "bitcoin")
    pub id: String,

    /// Display name (e.g., "Bitcoin")
    pub name: String,

    /// Ticker as reported upstream, usually lowercase (e.g., "btc")
    pub symbol: String,

    #[serde(default)]
    pub image: Option<String>,

    /// Price in USD
    #[serde(default, deserialize_with = "null_as_zero")]
    pub current_price: f64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub price_change_percentage_24h: f64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_volume: f64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub market_cap: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap_rank: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circulating_supply: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ath: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atl: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl Asset {
    /// Build an asset with only the quote fields the dashboard renders.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        current_price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into(),
            image: None,
            current_price,
            price_change_percentage_24h: 0.0,
            total_volume: 0.0,
            market_cap: 0.0,
            market_cap_rank: None,
            circulating_supply: None,
            total_supply: None,
            ath: None,
            atl: None,
            last_updated: None,
        }
    }

    pub fn with_change(mut self, pct: f64) -> Self {
        self.price_change_percentage_24h = pct;
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.total_volume = volume;
        self
    }

    pub fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = market_cap;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Case-insensitive match of `needle` (already lowercased) against name or symbol.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.symbol.to_lowercase().contains(needle)
    }
}

/// CoinGecko sends `null` for quotes it has not computed yet (fresh listings).
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
