use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::asset::Asset;
use crate::models::history::PriceHistory;
use crate::services::market_service::{MarketService, DEFAULT_MARKETS_LIMIT};

/// Where the dashboard gets its asset listing from.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AssetSource: Send + Sync {
    async fn fetch_assets(&self) -> Result<Vec<Asset>, CoreError>;
}

/// Where the chart gets its price series from.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait HistorySource: Send + Sync {
    async fn fetch_history(&self, id: &str, days: u32) -> Result<PriceHistory, CoreError>;
}

// ── In-process: read straight through the caching MarketService ─────

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AssetSource for MarketService {
    async fn fetch_assets(&self) -> Result<Vec<Asset>, CoreError> {
        self.list_tracked().await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl HistorySource for MarketService {
    async fn fetch_history(&self, id: &str, days: u32) -> Result<PriceHistory, CoreError> {
        self.price_history(id, days).await
    }
}

/// The markets page listing: the `limit` largest assets by market cap,
/// read through either a `MarketService` or a `ProxyClient`.
pub struct TopMarkets<M> {
    inner: Arc<M>,
    limit: u32,
}

impl<M> TopMarkets<M> {
    pub fn new(inner: Arc<M>) -> Self {
        Self::with_limit(inner, DEFAULT_MARKETS_LIMIT)
    }

    pub fn with_limit(inner: Arc<M>, limit: u32) -> Self {
        Self { inner, limit }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AssetSource for TopMarkets<MarketService> {
    async fn fetch_assets(&self) -> Result<Vec<Asset>, CoreError> {
        self.inner.top_markets(self.limit).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AssetSource for TopMarkets<ProxyClient> {
    async fn fetch_assets(&self) -> Result<Vec<Asset>, CoreError> {
        self.inner.fetch_markets(self.limit).await
    }
}

// ── Remote: talk to a running coin-dashboard-server ─────────────────

const PROVIDER: &str = "dashboard proxy";

/// HTTP client for the proxy's `/api/prices` and `/api/markets` routes.
pub struct ProxyClient {
    client: Client,
    base_url: String,
}

impl ProxyClient {
    /// `base_url` is the server origin, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Top `limit` assets by market cap from `/api/markets`.
    pub async fn fetch_markets(&self, limit: u32) -> Result<Vec<Asset>, CoreError> {
        self.get_json(&format!("{}/api/markets?limit={limit}", self.base_url))
            .await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, CoreError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::UpstreamStatus {
                provider: PROVIDER.into(),
                status: status.as_u16(),
            });
        }
        resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Unexpected response shape: {e}"),
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AssetSource for ProxyClient {
    async fn fetch_assets(&self) -> Result<Vec<Asset>, CoreError> {
        self.get_json(&format!("{}/api/prices", self.base_url)).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl HistorySource for ProxyClient {
    async fn fetch_history(&self, id: &str, days: u32) -> Result<PriceHistory, CoreError> {
        self.get_json(&format!(
            "{}/api/prices/{id}/history?days={days}",
            self.base_url
        ))
        .await
    }
}
