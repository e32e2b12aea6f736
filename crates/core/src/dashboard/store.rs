use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::CoreError;
use crate::models::asset::Asset;

/// Lifecycle of the dashboard listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardStatus {
    /// No successful fetch yet
    Loading,
    /// Showing the latest snapshot, nothing in flight
    Ready,
    /// A fetch is in flight while the previous snapshot stays visible
    Refreshing,
    /// The most recent fetch failed
    Error,
}

/// Sequence tag handed out by `begin_refresh` and returned with the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket {
    seq: u64,
}

impl RefreshTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Owned state behind the main dashboard page: the asset list, the
/// selection, the free-text filter and the refresh flags.
///
/// Refreshes are split into `begin_refresh` / `apply_refresh` so the caller
/// can await the fetch without holding a borrow. Every fetch carries a
/// monotonic ticket and a result is applied only if its ticket is newer
/// than the last one applied, so responses arriving out of order cannot
/// roll the list back.
///
/// Invariants kept after every mutation:
/// - the filtered view only references entries of the current list,
/// - the selection, if any, names an id present in the current list.
#[derive(Debug, Default)]
pub struct DashboardStore {
    assets: Vec<Asset>,
    /// Indices into `assets` matching `filter_query`, in list order
    filtered: Vec<usize>,
    filter_query: String,
    selected_id: Option<String>,
    error: Option<String>,
    has_loaded: bool,
    last_updated: Option<DateTime<Utc>>,
    issued_seq: u64,
    /// Highest ticket whose response has arrived (applied or discarded)
    settled_seq: u64,
    applied_seq: u64,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Refresh cycle ───────────────────────────────────────────────

    /// Tag a new fetch. The store reports `Refreshing` (or `Loading`) until
    /// this ticket, or a newer one, comes back.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued_seq += 1;
        RefreshTicket {
            seq: self.issued_seq,
        }
    }

    /// Apply the outcome of the fetch tagged by `ticket`.
    ///
    /// Returns `false` when the result was discarded because a newer fetch
    /// has already been applied.
    pub fn apply_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<Asset>, CoreError>,
    ) -> bool {
        self.settled_seq = self.settled_seq.max(ticket.seq);
        if ticket.seq <= self.applied_seq {
            tracing::debug!(
                seq = ticket.seq,
                applied = self.applied_seq,
                "discarding stale refresh result"
            );
            return false;
        }
        self.applied_seq = ticket.seq;

        match result {
            Ok(assets) => {
                self.assets = assets;
                self.has_loaded = true;
                self.error = None;
                self.last_updated = Some(Utc::now());
                self.rederive_view();
                self.reresolve_selection();
            }
            Err(e) => {
                tracing::warn!(seq = ticket.seq, error = %e, "dashboard refresh failed");
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Settle a fetch that will never report back (its task was cancelled).
    /// The data and error are left untouched.
    pub fn cancel_refresh(&mut self, ticket: RefreshTicket) {
        tracing::debug!(seq = ticket.seq, "refresh abandoned");
        self.settled_seq = self.settled_seq.max(ticket.seq);
    }

    // ── User input ──────────────────────────────────────────────────

    /// Update the free-text filter. The selection is left alone even if the
    /// selected asset no longer matches.
    pub fn set_filter_query(&mut self, query: impl Into<String>) {
        self.filter_query = query.into();
        self.rederive_view();
    }

    /// Select the asset with `id` if the current list contains it.
    /// Returns `true` if the selection changed.
    pub fn select_asset(&mut self, id: &str) -> bool {
        if !self.assets.iter().any(|a| a.id == id) {
            return false;
        }
        if self.selected_id.as_deref() == Some(id) {
            return false;
        }
        self.selected_id = Some(id.to_string());
        true
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn status(&self) -> DashboardStatus {
        if !self.has_loaded {
            return if self.error.is_some() {
                DashboardStatus::Error
            } else {
                DashboardStatus::Loading
            };
        }
        if self.is_refreshing() {
            DashboardStatus::Refreshing
        } else if self.error.is_some() {
            DashboardStatus::Error
        } else {
            DashboardStatus::Ready
        }
    }

    /// `true` while a fetch newer than every settled one is outstanding.
    pub fn is_refreshing(&self) -> bool {
        self.issued_seq > self.settled_seq
    }

    /// `true` once at least one fetch has succeeded.
    pub fn has_loaded(&self) -> bool {
        self.has_loaded
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn filtered_assets(&self) -> Vec<&Asset> {
        self.filtered.iter().map(|&i| &self.assets[i]).collect()
    }

    pub fn filter_query(&self) -> &str {
        &self.filter_query
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// The selected asset as of the latest snapshot.
    pub fn selected_asset(&self) -> Option<&Asset> {
        let id = self.selected_id.as_deref()?;
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Owned copy of everything a view needs to render.
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            status: self.status(),
            assets: self.assets.clone(),
            filtered: self.filtered_assets().into_iter().cloned().collect(),
            filter_query: self.filter_query.clone(),
            selected: self.selected_asset().cloned(),
            error: self.error.clone(),
            refreshing: self.is_refreshing(),
            has_loaded: self.has_loaded,
            last_updated: self.last_updated,
        }
    }

    // ── Internals ───────────────────────────────────────────────────

    fn rederive_view(&mut self) {
        let needle = self.filter_query.trim().to_lowercase();
        self.filtered = self
            .assets
            .iter()
            .enumerate()
            .filter(|(_, a)| needle.is_empty() || a.matches_lowercase(&needle))
            .map(|(i, _)| i)
            .collect();
    }

    /// Keep the selection if its id survived the refresh, otherwise fall
    /// back to the first asset (or nothing for an empty list).
    fn reresolve_selection(&mut self) {
        let still_present = self
            .selected_id
            .as_deref()
            .is_some_and(|id| self.assets.iter().any(|a| a.id == id));
        if !still_present {
            if let Some(dropped) = self.selected_id.take() {
                tracing::debug!(id = %dropped, "selected asset missing from refresh");
            }
            self.selected_id = self.assets.first().map(|a| a.id.clone());
        }
    }
}

/// Point-in-time copy of the dashboard state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub status: DashboardStatus,
    pub assets: Vec<Asset>,
    pub filtered: Vec<Asset>,
    pub filter_query: String,
    pub selected: Option<Asset>,
    pub error: Option<String>,
    pub refreshing: bool,
    /// At least one fetch has succeeded
    pub has_loaded: bool,
    pub last_updated: Option<DateTime<Utc>>,
}
