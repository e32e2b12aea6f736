//! API Error Types
//!
//! Every failure leaves the server as `{"error": "<message>"}`. Upstream
//! failures use a fixed message per route; the underlying cause is only
//! logged, never sent to the client.

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use coin_dashboard_core::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LISTING_FAILED: &str = "Failed to fetch cryptocurrency data";
pub const HISTORY_FAILED: &str = "Failed to fetch price history";
pub const CONVERSION_FAILED: &str = "Conversion failed";

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Listing or markets request could not be served
    #[error("Failed to fetch cryptocurrency data")]
    Listing(#[source] CoreError),

    /// History request could not be served
    #[error("Failed to fetch price history")]
    History(#[source] CoreError),

    /// Converter upstream failure
    #[error("Conversion failed")]
    Conversion(#[source] CoreError),

    /// No usable rate for the requested pair
    #[error("Conversion rate not available for selected currencies.")]
    RateUnavailable,

    /// Request validation failed
    #[error("{0}")]
    Validation(String),

    /// IO error (binding the listener, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Wrap a core error, keeping caller mistakes as 400s.
    pub fn from_core(e: CoreError, upstream: fn(CoreError) -> ApiError) -> Self {
        match e {
            e if e.is_client_error() => ApiError::Validation(e.to_string()),
            CoreError::RateNotAvailable { .. } => ApiError::RateUnavailable,
            e => upstream(e),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::RateUnavailable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Listing(_)
            | ApiError::History(_)
            | ApiError::Conversion(_)
            | ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            let cause = std::error::Error::source(&self)
                .map(|s| s.to_string())
                .unwrap_or_else(|| self.to_string());
            tracing::error!(
                request_id = %request_id,
                status = status.as_u16(),
                error_message = %self,
                cause = %cause,
                "API error occurred"
            );
        } else {
            tracing::debug!(request_id = %request_id, error_message = %self, "rejected request");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };

        let mut response = (status, Json(body)).into_response();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert("x-request-id", value);
        }
        response
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
