use thiserror::Error;

/// Unified error type for the entire coin-dashboard-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("{provider} responded with status: {status}")]
    UpstreamStatus { provider: String, status: u16 },

    #[error("API error ({provider}): {message}")]
    Api { provider: String, message: String },

    #[error("No provider available for {0}")]
    NoProvider(String),

    // ── Converter ───────────────────────────────────────────────────
    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Conversion rate not available for selected currencies.")]
    RateNotAvailable { from: String, to: String },

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    // ── Requests ────────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl CoreError {
    /// `true` for failures caused by the caller's input rather than an upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidAmount
                | CoreError::UnsupportedCurrency(_)
                | CoreError::ValidationError(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Api {
            provider: "json".into(),
            message: e.to_string(),
        }
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors embed the full URL; API keys may sit in the query.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
