use super::coinbase::CoinbaseProvider;
use super::exchangerate_host::ExchangeRateHostProvider;
use super::traits::{RateProvider, RateRoute};

/// Registry of exchange-rate providers.
///
/// Routes converter requests to the providers registered for a pair kind.
/// Several providers may serve the same route; registration order is the
/// fallback order.
pub struct RateProviderRegistry {
    providers: Vec<Box<dyn RateProvider>>,
}

impl RateProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with the default public providers.
    pub fn new_with_defaults() -> Self {
        Self::with_urls(
            super::coinbase::DEFAULT_BASE_URL,
            super::exchangerate_host::DEFAULT_BASE_URL,
        )
    }

    /// Default providers pointed at custom base URLs (staging, mirrors, tests).
    pub fn with_urls(coinbase_url: &str, exchangerate_url: &str) -> Self {
        let mut registry = Self::new();

        // Coinbase: anything involving BTC/ETH, no API key needed
        registry.register(Box::new(CoinbaseProvider::with_base_url(coinbase_url)));

        // exchangerate.host: fiat ↔ fiat
        registry.register(Box::new(ExchangeRateHostProvider::with_base_url(
            exchangerate_url,
        )));

        registry
    }

    /// Register a new rate provider.
    pub fn register(&mut self, provider: Box<dyn RateProvider>) {
        self.providers.push(provider);
    }

    /// Return ALL providers for the route, ordered by registration priority.
    pub fn get_providers_for(&self, route: RateRoute) -> Vec<&dyn RateProvider> {
        self.providers
            .iter()
            .filter(|p| p.supported_routes().contains(&route))
            .map(|p| p.as_ref())
            .collect()
    }
}

impl Default for RateProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
