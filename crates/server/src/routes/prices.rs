//! Price Routes
//!
//! - GET /api/prices - Quotes for the tracked assets
//! - GET /api/prices/:id/history?days=N - Price series for one asset

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use coin_dashboard_core::services::market_service::DEFAULT_HISTORY_DAYS;
use serde::Deserialize;
use std::sync::Arc;

use super::cache_control;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/prices
///
/// Current quote snapshot for every tracked asset, ordered by market cap.
pub async fn list_prices(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let assets = state
        .market
        .list_tracked()
        .await
        .map_err(|e| ApiError::from_core(e, ApiError::Listing))?;

    Ok((cache_control(state.market.listing_ttl()), Json(assets)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    /// Lookback window in days (default 7)
    pub days: Option<String>,
}

/// GET /api/prices/:id/history
///
/// `{prices: [[timestamp, price], ...]}` sorted by timestamp.
pub async fn price_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Response> {
    let days = match params.days.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_HISTORY_DAYS,
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| ApiError::Validation(format!("Invalid days value '{raw}'")))?,
    };

    let history = state
        .market
        .price_history(&id, days)
        .await
        .map_err(|e| ApiError::from_core(e, ApiError::History))?;

    Ok((cache_control(state.market.history_ttl()), Json(history)).into_response())
}
