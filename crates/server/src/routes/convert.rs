//! Converter Route
//!
//! - GET /api/convert?amount=&from=&to= - Convert between the supported currencies

use axum::{
    extract::{Query, State},
    Json,
};
use coin_dashboard_core::dashboard::converter_form::parse_amount;
use coin_dashboard_core::Conversion;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConvertParams {
    pub amount: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// GET /api/convert
///
/// Defaults to `1 USD → BTC`, the converter's initial state.
pub async fn convert(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConvertParams>,
) -> ApiResult<Json<Conversion>> {
    let amount = parse_amount(params.amount.as_deref().unwrap_or("1"))
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let from = params.from.as_deref().unwrap_or("USD");
    let to = params.to.as_deref().unwrap_or("BTC");

    let conversion = state
        .converter
        .convert_codes(amount, from, to)
        .await
        .map_err(|e| ApiError::from_core(e, ApiError::Conversion))?;

    Ok(Json(conversion))
}
