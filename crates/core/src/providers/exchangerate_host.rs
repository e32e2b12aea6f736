use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use super::traits::{RateProvider, RateRoute};

pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate.host";

const PROVIDER: &str = "exchangerate.host";

/// exchangerate.host provider for fiat ↔ fiat rates.
///
/// - **Endpoint**: `/convert?from={FROM}&to={TO}&amount=1`
/// - **Coverage**: ~170 fiat currencies, including KES.
///
/// We always ask for the conversion of one unit so the `result` field is
/// the rate itself; the converter applies the amount.
pub struct ExchangeRateHostProvider {
    client: Client,
    base_url: String,
}

impl ExchangeRateHostProvider {
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

impl Default for ExchangeRateHostProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── exchangerate.host API response types ────────────────────────────

#[derive(Deserialize)]
struct ConvertResponse {
    #[serde(default)]
    success: bool,
    result: Option<f64>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RateProvider for ExchangeRateHostProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn supported_routes(&self) -> Vec<RateRoute> {
        vec![RateRoute::Fiat]
    }

    async fn get_rate(&self, from: &str, to: &str) -> Result<f64, CoreError> {
        let base = from.to_uppercase();
        let target = to.to_uppercase();

        // Same currency → rate is 1.0
        if base == target {
            return Ok(1.0);
        }

        let url = format!("{}/convert?from={base}&to={target}&amount=1", self.base_url);
        tracing::debug!(provider = PROVIDER, %base, %target, "requesting fiat conversion");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::UpstreamStatus {
                provider: PROVIDER.into(),
                status: status.as_u16(),
            });
        }

        let body: ConvertResponse = resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse conversion for {base}/{target}: {e}"),
        })?;

        match (body.success, body.result) {
            (true, Some(rate)) => Ok(rate),
            _ => Err(CoreError::RateNotAvailable {
                from: base,
                to: target,
            }),
        }
    }
}
