use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::pending::Pending;
use super::source::AssetSource;
use super::store::{DashboardSnapshot, DashboardStore};

/// How often the dashboard re-polls the listing.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Drives a `DashboardStore` from an `AssetSource`, on demand and on a timer.
///
/// The store sits behind a `std::sync::Mutex` that is only ever held for
/// synchronous state updates, never across the fetch itself. Manual
/// `refresh()` calls and timer ticks may overlap; the store's sequence
/// tags decide which result sticks.
pub struct DashboardController {
    store: Arc<Mutex<DashboardStore>>,
    source: Arc<dyn AssetSource>,
    poller: Mutex<Option<JoinHandle<()>>>,
}

impl DashboardController {
    pub fn new(source: Arc<dyn AssetSource>) -> Self {
        Self::with_store(DashboardStore::new(), source)
    }

    pub fn with_store(store: DashboardStore, source: Arc<dyn AssetSource>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            source,
            poller: Mutex::new(None),
        }
    }

    /// Fetch the listing once. Returns `true` if the result was applied.
    pub async fn refresh(&self) -> bool {
        run_refresh(&self.store, self.source.as_ref()).await
    }

    pub fn set_filter_query(&self, query: impl Into<String>) {
        self.lock_store().set_filter_query(query);
    }

    pub fn select_asset(&self, id: &str) -> bool {
        self.lock_store().select_asset(id)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.lock_store().snapshot()
    }

    /// Run `f` against the current store state.
    pub fn read<R>(&self, f: impl FnOnce(&DashboardStore) -> R) -> R {
        f(&self.lock_store())
    }

    // ── Polling lifecycle ───────────────────────────────────────────

    /// Refresh now, then once every `interval`, until `stop()` is called or
    /// the controller is dropped. Starting again replaces the running poller.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, interval: Duration) {
        let store = Arc::clone(&self.store);
        let source = Arc::clone(&self.source);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // The first tick completes immediately.
                ticker.tick().await;
                run_refresh(&store, source.as_ref()).await;
            }
        });

        let previous = self
            .poller
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
        tracing::info!(interval_secs = interval.as_secs(), "dashboard polling started");
    }

    /// Cancel the poller. A fetch already in flight is abandoned with it and
    /// its ticket settled, so the store falls back to its last outcome.
    pub fn stop(&self) {
        let handle = self.poller.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(handle) = handle {
            handle.abort();
            tracing::info!("dashboard polling stopped");
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    fn lock_store(&self) -> std::sync::MutexGuard<'_, DashboardStore> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_refresh(store: &Mutex<DashboardStore>, source: &dyn AssetSource) -> bool {
    let ticket = store
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .begin_refresh();

    let pending = Pending::new(store, ticket, DashboardStore::cancel_refresh);
    let result = source.fetch_assets().await;
    pending.complete();

    store
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .apply_refresh(ticket, result)
}
