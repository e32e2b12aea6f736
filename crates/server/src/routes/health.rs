//! Health Route
//!
//! - GET /health - Liveness plus basic process info

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub provider: String,
    pub uptime_seconds: u64,
}

/// GET /health
///
/// Does not call any upstream; a healthy process is enough.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: state.market.provider_name().to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}
