use crate::errors::CoreError;
use crate::models::conversion::Conversion;
use crate::models::currency::Currency;
use crate::providers::registry::RateProviderRegistry;
use crate::providers::traits::RateRoute;

/// Converts an amount between any two currencies of the fixed converter set.
///
/// Routing:
/// - Crypto ↔ anything (e.g., USD → BTC, ETH → BTC): crypto-rate providers.
///   The rate is always requested with the cryptocurrency as the base, so
///   when the crypto is the *target* the result is `amount / rate`.
/// - Fiat ↔ Fiat (e.g., EUR → KES): fiat-rate providers, `amount * rate`.
///
/// Providers registered for a route are tried in order; the first valid
/// rate wins.
pub struct ConverterService {
    registry: RateProviderRegistry,
}

impl ConverterService {
    pub fn new(registry: RateProviderRegistry) -> Self {
        Self { registry }
    }

    /// Convert using currency codes as typed by a user (e.g., "usd", "BTC").
    pub async fn convert_codes(
        &self,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<Conversion, CoreError> {
        let from: Currency = from.parse()?;
        let to: Currency = to.parse()?;
        self.convert(amount, from, to).await
    }

    pub async fn convert(
        &self,
        amount: f64,
        from: Currency,
        to: Currency,
    ) -> Result<Conversion, CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::InvalidAmount);
        }

        if from == to {
            return Ok(Conversion {
                amount,
                from,
                to,
                rate: 1.0,
                result: amount,
                source: String::new(),
            });
        }

        if from.is_crypto() || to.is_crypto() {
            let crypto = if from.is_crypto() { from } else { to };
            let other = if crypto == from { to } else { from };

            let (quoted, source) = self
                .fetch_rate(RateRoute::Crypto, crypto.code(), other.code())
                .await?;

            // `quoted` is units of `other` per one `crypto`.
            let (rate, result) = if crypto == from {
                (quoted, amount * quoted)
            } else {
                (1.0 / quoted, amount / quoted)
            };

            return Ok(Conversion {
                amount,
                from,
                to,
                rate,
                result,
                source,
            });
        }

        let (rate, source) = self
            .fetch_rate(RateRoute::Fiat, from.code(), to.code())
            .await?;

        Ok(Conversion {
            amount,
            from,
            to,
            rate,
            result: amount * rate,
            source,
        })
    }

    /// Ask each provider for `route` in turn until one returns a usable rate.
    /// Returns the rate and the name of the provider that produced it.
    async fn fetch_rate(
        &self,
        route: RateRoute,
        base: &str,
        target: &str,
    ) -> Result<(f64, String), CoreError> {
        let providers = self.registry.get_providers_for(route);
        if providers.is_empty() {
            return Err(CoreError::NoProvider(route.to_string()));
        }

        let mut last_error = None;
        for provider in &providers {
            match provider.get_rate(base, target).await {
                Ok(rate) if rate.is_finite() && rate > 0.0 => {
                    return Ok((rate, provider.name().to_string()));
                }
                Ok(rate) => {
                    tracing::warn!(provider = provider.name(), %base, %target, rate, "discarding unusable rate");
                    last_error = Some(CoreError::RateNotAvailable {
                        from: base.to_string(),
                        to: target.to_string(),
                    });
                }
                Err(e) => {
                    tracing::warn!(provider = provider.name(), %base, %target, error = %e, "rate lookup failed");
                    last_error = Some(e);
                    // Try next provider
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CoreError::NoProvider(route.to_string())))
    }
}
