//! Stateless view models.
//!
//! The core computes every displayed string; a front end only lays them out.

pub mod card;
pub mod chart;
pub mod converter;
pub mod format;
pub mod table;

use serde::Serialize;

use crate::dashboard::store::{DashboardSnapshot, DashboardStatus};
use card::{render_cards, MarketCardView, PriceCardView};
use table::{render_table, TableRowView};

pub const NO_MATCHES: &str = "No coins found matching your search.";

/// Everything the main dashboard page renders for one state snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub status: DashboardStatus,
    /// Error banner text, if the last fetch failed
    pub error: Option<String>,
    /// Whether the asset list may be rendered at all (false until first load)
    pub show_list: bool,
    pub refreshing: bool,
    pub cards: Vec<PriceCardView>,
    /// Heading over the chart, e.g. `Bitcoin (BTC)`
    pub selected_heading: Option<String>,
    pub selected_id: Option<String>,
    /// Table rows for the filtered view
    pub rows: Vec<TableRowView>,
    /// Set when a filter is active and nothing matches
    pub empty_message: Option<&'static str>,
}

impl DashboardView {
    pub fn from_snapshot(snapshot: &DashboardSnapshot) -> Self {
        // Before the first successful fetch there is no list to fall back on.
        let show_list = snapshot.has_loaded;
        let selected_id = snapshot.selected.as_ref().map(|a| a.id.clone());

        let empty_message = if show_list && snapshot.filtered.is_empty() && !snapshot.assets.is_empty() {
            Some(NO_MATCHES)
        } else {
            None
        };

        Self {
            status: snapshot.status,
            error: snapshot.error.clone(),
            show_list,
            refreshing: snapshot.refreshing,
            cards: if show_list {
                render_cards(&snapshot.assets, selected_id.as_deref())
            } else {
                Vec::new()
            },
            selected_heading: snapshot
                .selected
                .as_ref()
                .map(|a| format!("{} ({})", a.name, a.symbol.to_uppercase())),
            selected_id,
            rows: if show_list {
                render_table(&snapshot.filtered)
            } else {
                Vec::new()
            },
            empty_message,
        }
    }
}

/// The markets page: a search-filtered grid of the top coins by market cap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketsView {
    pub status: DashboardStatus,
    pub error: Option<String>,
    /// Spinner until the first listing arrives
    pub loading: bool,
    pub cards: Vec<MarketCardView>,
    /// Set whenever the loaded grid is empty after filtering
    pub empty_message: Option<&'static str>,
}

impl MarketsView {
    pub fn from_snapshot(snapshot: &DashboardSnapshot) -> Self {
        let loading = !snapshot.has_loaded && snapshot.error.is_none();
        let cards: Vec<MarketCardView> = if snapshot.has_loaded {
            snapshot.filtered.iter().map(MarketCardView::from_asset).collect()
        } else {
            Vec::new()
        };
        let empty_message = (snapshot.has_loaded && cards.is_empty()).then_some(NO_MATCHES);

        Self {
            status: snapshot.status,
            error: snapshot.error.clone(),
            loading,
            cards,
            empty_message,
        }
    }
}
