use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::history::PriceHistory;
use crate::models::timeframe::Timeframe;
use crate::views::chart::ChartView;
use super::pending::Pending;
use super::source::HistorySource;

#[derive(Debug, Default)]
struct ChartState {
    asset_id: Option<String>,
    timeframe: Timeframe,
    /// Last history applied, with the (id, timeframe) it was fetched for
    loaded: Option<(String, Timeframe, PriceHistory)>,
    error: Option<String>,
    issued_seq: u64,
    settled_seq: u64,
    applied_seq: u64,
}

impl ChartState {
    fn abandon(&mut self, seq: u64) {
        self.settled_seq = self.settled_seq.max(seq);
    }
}

/// Price chart for the selected asset.
///
/// Re-fetches whenever the asset id or the timeframe actually changes.
/// Each fetch is sequence-tagged like the dashboard listing, so a slow
/// response for a previous selection never replaces a newer one.
pub struct ChartController {
    state: Mutex<ChartState>,
    source: Arc<dyn HistorySource>,
}

impl ChartController {
    pub fn new(source: Arc<dyn HistorySource>) -> Self {
        Self {
            state: Mutex::new(ChartState::default()),
            source,
        }
    }

    pub fn asset_id(&self) -> Option<String> {
        self.lock().asset_id.clone()
    }

    pub fn timeframe(&self) -> Timeframe {
        self.lock().timeframe
    }

    /// Point the chart at another asset. Fetches only if `id` differs from
    /// the current one; returns whether a fetch result was applied.
    pub async fn set_asset(&self, id: &str) -> bool {
        {
            let mut state = self.lock();
            if state.asset_id.as_deref() == Some(id) {
                return false;
            }
            state.asset_id = Some(id.to_string());
        }
        self.reload().await
    }

    /// Switch the lookback window. Fetches only on an actual change.
    pub async fn set_timeframe(&self, timeframe: Timeframe) -> bool {
        {
            let mut state = self.lock();
            if state.timeframe == timeframe {
                return false;
            }
            state.timeframe = timeframe;
        }
        self.reload().await
    }

    /// Fetch the series for the current asset and timeframe.
    /// Returns `true` if the result was applied.
    pub async fn reload(&self) -> bool {
        let (seq, id, timeframe) = {
            let mut state = self.lock();
            let Some(id) = state.asset_id.clone() else {
                return false;
            };
            state.issued_seq += 1;
            (state.issued_seq, id, state.timeframe)
        };

        let pending = Pending::new(&self.state, seq, ChartState::abandon);
        let result = self.source.fetch_history(&id, timeframe.days()).await;
        pending.complete();

        let mut state = self.lock();
        state.settled_seq = state.settled_seq.max(seq);
        if seq <= state.applied_seq {
            tracing::debug!(%id, seq, "discarding stale chart data");
            return false;
        }
        state.applied_seq = seq;

        match result {
            Ok(history) => {
                state.loaded = Some((id, timeframe, history));
                state.error = None;
            }
            Err(e) => {
                tracing::warn!(%id, %timeframe, error = %e, "failed to fetch chart data");
                state.loaded = None;
                state.error = Some(e.to_string());
            }
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        let state = self.lock();
        state.issued_seq > state.settled_seq
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// History for the current (asset, timeframe), if it has been loaded.
    pub fn history(&self) -> Option<PriceHistory> {
        let state = self.lock();
        match (&state.loaded, &state.asset_id) {
            (Some((id, tf, history)), Some(current)) if id == current && *tf == state.timeframe => {
                Some(history.clone())
            }
            _ => None,
        }
    }

    /// What the chart area should show right now.
    pub fn view(&self) -> ChartView {
        if self.is_loading() {
            return ChartView::Loading;
        }
        let timeframe = self.timeframe();
        match self.history() {
            Some(history) if !history.is_empty() => ChartView::from_history(&history, timeframe),
            _ => ChartView::Empty,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ChartState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
