use std::sync::Arc;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::asset::Asset;
use crate::models::history::PriceHistory;
use crate::providers::traits::MarketDataProvider;
use super::cache::TtlCache;

/// Assets shown on the dashboard when nothing else is configured.
pub const DEFAULT_TRACKED_IDS: [&str; 7] = [
    "bitcoin",
    "ethereum",
    "ripple",
    "cardano",
    "solana",
    "polkadot",
    "dogecoin",
];

pub const DEFAULT_LISTING_TTL: Duration = Duration::from_secs(60);
pub const DEFAULT_HISTORY_TTL: Duration = Duration::from_secs(3600);

pub const DEFAULT_HISTORY_DAYS: u32 = 7;
/// Maximum history lookback in days (10 years).
pub const MAX_HISTORY_DAYS: u32 = 3650;

pub const DEFAULT_MARKETS_LIMIT: u32 = 50;
pub const MAX_MARKETS_LIMIT: u32 = 250;

/// Tunables for `MarketService`.
#[derive(Debug, Clone)]
pub struct MarketServiceConfig {
    /// Asset ids returned by `list_tracked`, in request order
    pub tracked_ids: Vec<String>,
    /// TTL for the tracked listing and the top-markets listing
    pub listing_ttl: Duration,
    /// TTL for each per-asset history
    pub history_ttl: Duration,
}

impl Default for MarketServiceConfig {
    fn default() -> Self {
        Self {
            tracked_ids: DEFAULT_TRACKED_IDS.iter().map(|s| s.to_string()).collect(),
            listing_ttl: DEFAULT_LISTING_TTL,
            history_ttl: DEFAULT_HISTORY_TTL,
        }
    }
}

/// Fetches listings and history from a market-data provider, with caching.
///
/// Cache strategy:
/// - **Tracked listing**: one entry, refreshed at most once per listing TTL.
/// - **Top markets**: keyed by limit, same TTL as the listing.
/// - **History**: keyed by `(id, days)`, refreshed at most once per history TTL.
///
/// Failures are never cached, so the next request after an upstream outage
/// goes straight to the provider again.
pub struct MarketService {
    provider: Arc<dyn MarketDataProvider>,
    tracked_ids: Vec<String>,
    listing_cache: TtlCache<(), Vec<Asset>>,
    markets_cache: TtlCache<u32, Vec<Asset>>,
    history_cache: TtlCache<(String, u32), PriceHistory>,
}

impl MarketService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self::with_config(provider, MarketServiceConfig::default())
    }

    pub fn with_config(provider: Arc<dyn MarketDataProvider>, config: MarketServiceConfig) -> Self {
        Self {
            provider,
            tracked_ids: config.tracked_ids,
            listing_cache: TtlCache::new(config.listing_ttl),
            markets_cache: TtlCache::new(config.listing_ttl),
            history_cache: TtlCache::new(config.history_ttl),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn tracked_ids(&self) -> &[String] {
        &self.tracked_ids
    }

    pub fn listing_ttl(&self) -> Duration {
        self.listing_cache.ttl()
    }

    pub fn history_ttl(&self) -> Duration {
        self.history_cache.ttl()
    }

    /// Current quotes for the tracked assets.
    pub async fn list_tracked(&self) -> Result<Vec<Asset>, CoreError> {
        if let Some(assets) = self.listing_cache.get(&()) {
            tracing::trace!("tracked listing served from cache");
            return Ok(assets);
        }

        let assets = self.provider.list_assets(&self.tracked_ids).await?;
        tracing::debug!(count = assets.len(), provider = self.provider.name(), "fetched tracked listing");
        self.listing_cache.insert((), assets.clone());
        Ok(assets)
    }

    /// The `limit` largest assets by market cap.
    pub async fn top_markets(&self, limit: u32) -> Result<Vec<Asset>, CoreError> {
        if limit == 0 || limit > MAX_MARKETS_LIMIT {
            return Err(CoreError::ValidationError(format!(
                "limit must be between 1 and {MAX_MARKETS_LIMIT}, got {limit}"
            )));
        }

        if let Some(assets) = self.markets_cache.get(&limit) {
            return Ok(assets);
        }

        let assets = self.provider.top_assets(limit).await?;
        tracing::debug!(count = assets.len(), limit, "fetched top markets");
        self.markets_cache.insert(limit, assets.clone());
        Ok(assets)
    }

    /// Price history for one asset, sorted by timestamp.
    pub async fn price_history(&self, id: &str, days: u32) -> Result<PriceHistory, CoreError> {
        validate_asset_id(id)?;
        if days == 0 || days > MAX_HISTORY_DAYS {
            return Err(CoreError::ValidationError(format!(
                "days must be between 1 and {MAX_HISTORY_DAYS}, got {days}"
            )));
        }

        let key = (id.to_string(), days);
        if let Some(history) = self.history_cache.get(&key) {
            return Ok(history);
        }

        let mut history = self.provider.price_history(id, days).await?;
        history.sort_by_timestamp();
        tracing::debug!(%id, days, points = history.prices.len(), "fetched price history");
        self.history_cache.insert(key, history.clone());
        Ok(history)
    }

    /// Forget every cached response.
    pub fn clear_cache(&self) {
        self.listing_cache.clear();
        self.markets_cache.clear();
        self.history_cache.clear();
    }
}

/// Asset ids are upstream slugs ("bitcoin", "usd-coin"); anything else
/// would end up spliced into an upstream URL path.
pub fn validate_asset_id(id: &str) -> Result<(), CoreError> {
    let valid = !id.is_empty()
        && id.len() <= 100
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(CoreError::ValidationError(format!("Invalid asset id '{id}'")))
    }
}
