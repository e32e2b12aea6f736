//! Server configuration
//!
//! Every option can be given as a flag or an environment variable.

use std::time::Duration;

use clap::Parser;
use coin_dashboard_core::providers::{coinbase, coingecko, exchangerate_host};
use coin_dashboard_core::services::market_service::{
    MarketServiceConfig, DEFAULT_TRACKED_IDS,
};

/// Coin Dashboard API proxy
#[derive(Debug, Clone, Parser)]
#[command(name = "coin-dashboard-server", version, about)]
pub struct ServerConfig {
    /// Host to bind to
    #[arg(long, env = "COIN_DASHBOARD_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "COIN_DASHBOARD_PORT", default_value_t = 8080)]
    pub port: u16,

    /// CoinGecko API base URL
    #[arg(long, env = "COINGECKO_URL", default_value = coingecko::DEFAULT_BASE_URL)]
    pub coingecko_url: String,

    /// Optional CoinGecko demo API key
    #[arg(long, env = "COINGECKO_API_KEY", hide_env_values = true)]
    pub coingecko_api_key: Option<String>,

    /// Coinbase API base URL (crypto exchange rates)
    #[arg(long, env = "COINBASE_URL", default_value = coinbase::DEFAULT_BASE_URL)]
    pub coinbase_url: String,

    /// exchangerate.host base URL (fiat exchange rates)
    #[arg(long, env = "EXCHANGERATE_URL", default_value = exchangerate_host::DEFAULT_BASE_URL)]
    pub exchangerate_url: String,

    /// Comma-separated asset ids served by /api/prices
    #[arg(
        long,
        env = "COIN_DASHBOARD_TRACKED_IDS",
        value_delimiter = ',',
        default_values_t = DEFAULT_TRACKED_IDS.map(String::from)
    )]
    pub tracked_ids: Vec<String>,

    /// Seconds a listing response stays cached
    #[arg(long, env = "COIN_DASHBOARD_LISTING_TTL_SECS", default_value_t = 60)]
    pub listing_ttl_secs: u64,

    /// Seconds a price history response stays cached
    #[arg(long, env = "COIN_DASHBOARD_HISTORY_TTL_SECS", default_value_t = 3600)]
    pub history_ttl_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            coingecko_url: coingecko::DEFAULT_BASE_URL.to_string(),
            coingecko_api_key: None,
            coinbase_url: coinbase::DEFAULT_BASE_URL.to_string(),
            exchangerate_url: exchangerate_host::DEFAULT_BASE_URL.to_string(),
            tracked_ids: DEFAULT_TRACKED_IDS.iter().map(|s| s.to_string()).collect(),
            listing_ttl_secs: 60,
            history_ttl_secs: 3600,
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn market_config(&self) -> MarketServiceConfig {
        MarketServiceConfig {
            tracked_ids: self
                .tracked_ids
                .iter()
                .map(|id| id.trim().to_lowercase())
                .filter(|id| !id.is_empty())
                .collect(),
            listing_ttl: Duration::from_secs(self.listing_ttl_secs),
            history_ttl: Duration::from_secs(self.history_ttl_secs),
        }
    }
}
