use serde::Serialize;

use crate::models::asset::Asset;
use super::format::{
    format_arrow_percent, format_signed_percent, format_usd_billions, format_usd_price,
};

/// Direction of the 24h move, for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceDirection {
    Up,
    Down,
}

impl PriceDirection {
    pub fn of(change_pct: f64) -> Self {
        if change_pct >= 0.0 {
            PriceDirection::Up
        } else {
            PriceDirection::Down
        }
    }
}

/// Quick-overview card on the dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceCardView {
    pub id: String,
    /// Upper-cased ticker
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub price: String,
    /// e.g. `↑ 2.34%`
    pub change: String,
    pub direction: PriceDirection,
    pub selected: bool,
}

impl PriceCardView {
    pub fn from_asset(asset: &Asset, selected: bool) -> Self {
        Self {
            id: asset.id.clone(),
            symbol: asset.symbol.to_uppercase(),
            name: asset.name.clone(),
            image: asset.image.clone(),
            price: format_usd_price(asset.current_price),
            change: format_arrow_percent(asset.price_change_percentage_24h),
            direction: PriceDirection::of(asset.price_change_percentage_24h),
            selected,
        }
    }
}

/// One card per asset, with the selected one flagged.
pub fn render_cards<'a>(
    assets: impl IntoIterator<Item = &'a Asset>,
    selected_id: Option<&str>,
) -> Vec<PriceCardView> {
    assets
        .into_iter()
        .map(|a| PriceCardView::from_asset(a, selected_id == Some(a.id.as_str())))
        .collect()
}

/// Card on the markets page (top coins by market cap).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketCardView {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub price: String,
    /// e.g. `+2.34%`
    pub change: String,
    pub direction: PriceDirection,
    /// e.g. `$1.23B`
    pub market_cap: String,
}

impl MarketCardView {
    pub fn from_asset(asset: &Asset) -> Self {
        Self {
            id: asset.id.clone(),
            name: asset.name.clone(),
            symbol: asset.symbol.to_uppercase(),
            price: format_usd_price(asset.current_price),
            change: format_signed_percent(asset.price_change_percentage_24h),
            direction: PriceDirection::of(asset.price_change_percentage_24h),
            market_cap: format_usd_billions(asset.market_cap),
        }
    }
}
