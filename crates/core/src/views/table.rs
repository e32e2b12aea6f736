use serde::Serialize;

use crate::models::asset::Asset;
use super::card::PriceDirection;
use super::format::{format_signed_percent, format_usd_price, format_usd_whole};

/// One row of the "All Cryptocurrencies" table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRowView {
    /// 1-based position in the rendered list
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub image: Option<String>,
    pub price: String,
    pub change: String,
    pub direction: PriceDirection,
    pub volume: String,
    pub market_cap: String,
}

impl TableRowView {
    pub fn from_asset(rank: usize, asset: &Asset) -> Self {
        Self {
            rank,
            id: asset.id.clone(),
            name: asset.name.clone(),
            symbol: asset.symbol.to_uppercase(),
            image: asset.image.clone(),
            price: format_usd_price(asset.current_price),
            change: format_signed_percent(asset.price_change_percentage_24h),
            direction: PriceDirection::of(asset.price_change_percentage_24h),
            volume: format_usd_whole(asset.total_volume),
            market_cap: format_usd_whole(asset.market_cap),
        }
    }
}

pub fn render_table<'a>(assets: impl IntoIterator<Item = &'a Asset>) -> Vec<TableRowView> {
    assets
        .into_iter()
        .enumerate()
        .map(|(i, a)| TableRowView::from_asset(i + 1, a))
        .collect()
}
