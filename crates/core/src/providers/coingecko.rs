use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::asset::Asset;
use crate::models::history::PriceHistory;
use super::traits::MarketDataProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

const PROVIDER: &str = "CoinGecko";

/// CoinGecko API provider for crypto listings and price history.
///
/// - **Free**: works without a key; a demo key raises the rate limit.
/// - **Endpoints**: `/coins/markets`, `/coins/{id}/market_chart`
/// - **Quotes**: always requested in USD.
///
/// Non-success statuses become `CoreError::UpstreamStatus`; the upstream
/// body is dropped so it never reaches our own clients.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, None)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let req = self.client.get(url).header("Accept", "application/json");
        match &self.api_key {
            Some(key) => req.header("x-cg-demo-api-key", key),
            None => req,
        }
    }

    /// Send a request, check the status, and decode the JSON body.
    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        what: &str,
    ) -> Result<T, CoreError> {
        tracing::debug!(provider = PROVIDER, %what, "requesting upstream");
        let resp = self.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(provider = PROVIDER, status = status.as_u16(), %what, "upstream returned non-success status");
            return Err(CoreError::UpstreamStatus {
                provider: PROVIDER.into(),
                status: status.as_u16(),
            });
        }

        resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse {what}: {e}"),
        })
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn list_assets(&self, ids: &[String]) -> Result<Vec<Asset>, CoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!(
            "{}/coins/markets?vs_currency=usd&ids={}&order=market_cap_desc&per_page=100&page=1&sparkline=false&price_change_percentage=24h",
            self.base_url,
            ids.join(",")
        );
        self.fetch_json(&url, "asset listing").await
    }

    async fn top_assets(&self, limit: u32) -> Result<Vec<Asset>, CoreError> {
        let url = format!(
            "{}/coins/markets?vs_currency=usd&order=market_cap_desc&per_page={limit}&page=1&sparkline=false",
            self.base_url
        );
        self.fetch_json(&url, "market listing").await
    }

    async fn price_history(&self, id: &str, days: u32) -> Result<PriceHistory, CoreError> {
        let url = format!(
            "{}/coins/{id}/market_chart?vs_currency=usd&days={days}",
            self.base_url
        );
        self.fetch_json(&url, &format!("history for {id}")).await
    }
}
