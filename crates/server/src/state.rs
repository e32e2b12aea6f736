//! Application State
//!
//! Shared state accessible by all handlers.

use std::sync::Arc;
use std::time::Instant;

use coin_dashboard_core::providers::coingecko::CoinGeckoProvider;
use coin_dashboard_core::providers::registry::RateProviderRegistry;
use coin_dashboard_core::{ConverterService, MarketService};

use crate::config::ServerConfig;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Cached listing/history access to the market-data provider
    pub market: Arc<MarketService>,
    /// Currency converter over the exchange-rate providers
    pub converter: Arc<ConverterService>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(market: MarketService, converter: ConverterService) -> Self {
        Self {
            market: Arc::new(market),
            converter: Arc::new(converter),
            start_time: Instant::now(),
        }
    }

    /// Wire the public upstream providers from configuration.
    pub fn from_config(config: &ServerConfig) -> Self {
        let provider = CoinGeckoProvider::with_base_url(
            config.coingecko_url.clone(),
            config.coingecko_api_key.clone(),
        );
        let market = MarketService::with_config(Arc::new(provider), config.market_config());

        let registry = RateProviderRegistry::with_urls(&config.coinbase_url, &config.exchangerate_url);
        let converter = ConverterService::new(registry);

        Self::new(market, converter)
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
