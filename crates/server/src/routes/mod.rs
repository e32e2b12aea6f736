//! API Routes
//!
//! Route handlers organized by functionality.

pub mod convert;
pub mod health;
pub mod markets;
pub mod prices;

use axum::http::header;
use std::time::Duration;

/// `Cache-Control` header telling clients and CDNs how long a response stays fresh.
pub(crate) fn cache_control(ttl: Duration) -> [(header::HeaderName, String); 1] {
    [(
        header::CACHE_CONTROL,
        format!("public, max-age={}", ttl.as_secs()),
    )]
}
