use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use super::traits::{RateProvider, RateRoute};

pub const DEFAULT_BASE_URL: &str = "https://api.coinbase.com/v2";

const PROVIDER: &str = "Coinbase";

/// Coinbase exchange-rates API for any pair involving a cryptocurrency.
///
/// - **Free**: No API key required.
/// - **Endpoint**: `/exchange-rates?currency={BASE}`
///
/// Rates come back as decimal strings keyed by currency code, relative to
/// the requested base.
pub struct CoinbaseProvider {
    client: Client,
    base_url: String,
}

impl CoinbaseProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for CoinbaseProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── Coinbase API response types ─────────────────────────────────────

#[derive(Deserialize)]
struct ExchangeRatesResponse {
    data: Option<ExchangeRatesData>,
}

#[derive(Deserialize)]
struct ExchangeRatesData {
    rates: Option<HashMap<String, String>>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RateProvider for CoinbaseProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn supported_routes(&self) -> Vec<RateRoute> {
        vec![RateRoute::Crypto]
    }

    async fn get_rate(&self, from: &str, to: &str) -> Result<f64, CoreError> {
        let base = from.to_uppercase();
        let target = to.to_uppercase();

        let url = format!("{}/exchange-rates?currency={base}", self.base_url);
        tracing::debug!(provider = PROVIDER, %base, %target, "requesting exchange rates");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::UpstreamStatus {
                provider: PROVIDER.into(),
                status: status.as_u16(),
            });
        }

        let body: ExchangeRatesResponse = resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse rates for {base}: {e}"),
        })?;

        let rates = body
            .data
            .and_then(|d| d.rates)
            .ok_or_else(|| CoreError::Api {
                provider: PROVIDER.into(),
                message: "Invalid response from Coinbase API".into(),
            })?;

        let raw = rates.get(&target).ok_or_else(|| CoreError::RateNotAvailable {
            from: base.clone(),
            to: target.clone(),
        })?;

        raw.parse().map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Invalid rate format for {base} → {target}: {e}"),
        })
    }
}
