//! Markets Route
//!
//! - GET /api/markets?limit=N - Top assets by market cap (default 50)

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use coin_dashboard_core::services::market_service::DEFAULT_MARKETS_LIMIT;
use serde::Deserialize;
use std::sync::Arc;

use super::cache_control;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MarketsParams {
    pub limit: Option<String>,
}

/// GET /api/markets
pub async fn list_markets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MarketsParams>,
) -> ApiResult<Response> {
    let limit = match params.limit.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_MARKETS_LIMIT,
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| ApiError::Validation(format!("Invalid limit value '{raw}'")))?,
    };

    let assets = state
        .market
        .top_markets(limit)
        .await
        .map_err(|e| ApiError::from_core(e, ApiError::Listing))?;

    Ok((cache_control(state.market.listing_ttl()), Json(assets)).into_response())
}
