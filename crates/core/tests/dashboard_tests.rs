// ═══════════════════════════════════════════════════════════════════
// Dashboard Tests — DashboardStore, DashboardController,
// ChartController, ConverterForm
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use coin_dashboard_core::dashboard::chart::ChartController;
use coin_dashboard_core::dashboard::controller::{DashboardController, DEFAULT_POLL_INTERVAL};
use coin_dashboard_core::dashboard::converter_form::{parse_amount, ConverterForm};
use coin_dashboard_core::dashboard::source::{AssetSource, HistorySource};
use coin_dashboard_core::dashboard::store::{DashboardStatus, DashboardStore};
use coin_dashboard_core::errors::CoreError;
use coin_dashboard_core::models::asset::Asset;
use coin_dashboard_core::models::currency::Currency;
use coin_dashboard_core::models::history::{PriceHistory, PricePoint};
use coin_dashboard_core::models::timeframe::Timeframe;
use coin_dashboard_core::providers::registry::RateProviderRegistry;
use coin_dashboard_core::providers::traits::{RateProvider, RateRoute};
use coin_dashboard_core::services::converter_service::ConverterService;
use coin_dashboard_core::views::chart::{ChartView, NO_CHART_DATA};

// ═══════════════════════════════════════════════════════════════════
// Fixtures & Mock Sources
// ═══════════════════════════════════════════════════════════════════

fn btc() -> Asset {
    Asset::new("bitcoin", "Bitcoin", "btc", 65_000.0).with_change(2.5)
}

fn eth() -> Asset {
    Asset::new("ethereum", "Ethereum", "eth", 3_200.0).with_change(-1.2)
}

fn sol() -> Asset {
    Asset::new("solana", "Solana", "sol", 150.0)
}

fn doge() -> Asset {
    Asset::new("dogecoin", "Dogecoin", "doge", 0.12)
}

fn all_assets() -> Vec<Asset> {
    vec![btc(), eth(), sol(), doge()]
}

fn upstream_down() -> CoreError {
    CoreError::UpstreamStatus {
        provider: "mock".into(),
        status: 500,
    }
}

fn ids(assets: &[&Asset]) -> Vec<String> {
    assets.iter().map(|a| a.id.clone()).collect()
}

/// Replays queued responses, then keeps answering with the full list.
#[derive(Default)]
struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<Asset>, CoreError>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    fn with(responses: Vec<Result<Vec<Asset>, CoreError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetSource for ScriptedSource {
    async fn fetch_assets(&self) -> Result<Vec<Asset>, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(all_assets()))
    }
}

/// Takes five seconds per fetch, then returns the full list.
#[derive(Default)]
struct SlowSource {
    calls: AtomicUsize,
}

#[async_trait]
impl AssetSource for SlowSource {
    async fn fetch_assets(&self) -> Result<Vec<Asset>, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(all_assets())
    }
}

/// History source with a per-asset delay; "broken" always fails.
#[derive(Default)]
struct SlowHistory {
    requests: Mutex<Vec<(String, u32)>>,
}

#[async_trait]
impl HistorySource for SlowHistory {
    async fn fetch_history(&self, id: &str, days: u32) -> Result<PriceHistory, CoreError> {
        self.requests.lock().unwrap().push((id.to_string(), days));
        let delay = if id == "bitcoin" { 10 } else { 1 };
        tokio::time::sleep(Duration::from_secs(delay)).await;
        if id == "broken" {
            return Err(upstream_down());
        }
        Ok(PriceHistory::from_prices(vec![
            PricePoint::new(1_700_000_000_000, 100.0),
            PricePoint::new(1_700_086_400_000, 110.0),
            PricePoint::new(1_700_172_800_000, days as f64),
        ]))
    }
}

/// BTC-based rates; the first lookup is slow, every later one is fast.
struct SlowFirstRates {
    calls: AtomicUsize,
}

#[async_trait]
impl RateProvider for SlowFirstRates {
    fn name(&self) -> &str {
        "slow-first"
    }

    fn supported_routes(&self) -> Vec<RateRoute> {
        vec![RateRoute::Crypto]
    }

    async fn get_rate(&self, from: &str, to: &str) -> Result<f64, CoreError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = if call == 0 { 10 } else { 1 };
        tokio::time::sleep(Duration::from_secs(delay)).await;
        match (from, to) {
            ("BTC", "USD") => Ok(50_000.0),
            _ => Err(CoreError::RateNotAvailable {
                from: from.into(),
                to: to.into(),
            }),
        }
    }
}

fn form() -> ConverterForm {
    let mut registry = RateProviderRegistry::new();
    registry.register(Box::new(SlowFirstRates {
        calls: AtomicUsize::new(0),
    }));
    ConverterForm::new(ConverterService::new(registry))
}

fn loaded_store(assets: Vec<Asset>) -> DashboardStore {
    let mut store = DashboardStore::new();
    let ticket = store.begin_refresh();
    assert!(store.apply_refresh(ticket, Ok(assets)));
    store
}

// ═══════════════════════════════════════════════════════════════════
// DashboardStore — Status & Refresh Cycle
// ═══════════════════════════════════════════════════════════════════

mod store_refresh {
    use super::*;

    #[test]
    fn test_initial_state_is_loading() {
        let store = DashboardStore::new();
        assert_eq!(store.status(), DashboardStatus::Loading);
        assert!(!store.has_loaded());
        assert!(store.assets().is_empty());
        assert!(store.selected_asset().is_none());
        assert!(store.last_updated().is_none());
    }

    #[test]
    fn test_first_success_is_ready_and_selects_first() {
        let mut store = DashboardStore::new();
        let ticket = store.begin_refresh();
        assert_eq!(store.status(), DashboardStatus::Loading);
        assert!(store.is_refreshing());

        assert!(store.apply_refresh(ticket, Ok(all_assets())));
        assert_eq!(store.status(), DashboardStatus::Ready);
        assert!(!store.is_refreshing());
        assert_eq!(store.selected_id(), Some("bitcoin"));
        assert!(store.last_updated().is_some());
    }

    #[test]
    fn test_first_failure_is_error() {
        let mut store = DashboardStore::new();
        let ticket = store.begin_refresh();
        assert!(store.apply_refresh(ticket, Err(upstream_down())));

        assert_eq!(store.status(), DashboardStatus::Error);
        assert!(!store.has_loaded());
        assert_eq!(store.error(), Some("mock responded with status: 500"));
    }

    #[test]
    fn test_refreshing_keeps_previous_snapshot() {
        let mut store = loaded_store(all_assets());
        let _ticket = store.begin_refresh();

        assert_eq!(store.status(), DashboardStatus::Refreshing);
        assert_eq!(store.assets().len(), 4);
        let snapshot = store.snapshot();
        assert!(snapshot.refreshing);
        assert_eq!(snapshot.status, DashboardStatus::Refreshing);
    }

    #[test]
    fn test_failure_keeps_last_good_list_and_selection() {
        let mut store = loaded_store(all_assets());
        store.select_asset("solana");

        let ticket = store.begin_refresh();
        assert!(store.apply_refresh(ticket, Err(upstream_down())));

        assert_eq!(store.status(), DashboardStatus::Error);
        assert_eq!(store.assets().len(), 4);
        assert_eq!(store.selected_id(), Some("solana"));

        // Next success clears the error
        let ticket = store.begin_refresh();
        store.apply_refresh(ticket, Ok(all_assets()));
        assert_eq!(store.status(), DashboardStatus::Ready);
        assert!(store.error().is_none());
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut store = DashboardStore::new();
        let older = store.begin_refresh();
        let newer = store.begin_refresh();
        assert!(older < newer);

        assert!(store.apply_refresh(newer, Ok(vec![btc(), eth()])));
        assert!(!store.apply_refresh(older, Ok(vec![doge()])));

        assert_eq!(ids(&store.assets().iter().collect::<Vec<_>>()), vec!["bitcoin", "ethereum"]);
        assert!(!store.is_refreshing());
    }

    #[test]
    fn test_stale_error_does_not_mark_failure() {
        let mut store = DashboardStore::new();
        let older = store.begin_refresh();
        let newer = store.begin_refresh();

        store.apply_refresh(newer, Ok(all_assets()));
        assert!(!store.apply_refresh(older, Err(upstream_down())));
        assert_eq!(store.status(), DashboardStatus::Ready);
    }

    #[test]
    fn test_refreshing_until_newest_ticket_settles() {
        let mut store = loaded_store(all_assets());
        let older = store.begin_refresh();
        let newer = store.begin_refresh();

        store.apply_refresh(older, Ok(all_assets()));
        assert!(store.is_refreshing());

        store.apply_refresh(newer, Ok(all_assets()));
        assert!(!store.is_refreshing());
    }

    #[test]
    fn test_cancelled_refresh_settles_without_changes() {
        let mut store = DashboardStore::new();
        let first = store.begin_refresh();
        store.cancel_refresh(first);
        assert!(!store.is_refreshing());
        assert_eq!(store.status(), DashboardStatus::Loading);
        assert!(!store.has_loaded());

        let mut store = loaded_store(all_assets());
        let ticket = store.begin_refresh();
        store.cancel_refresh(ticket);
        assert_eq!(store.status(), DashboardStatus::Ready);
        assert_eq!(store.assets().len(), 4);
        assert!(store.error().is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// DashboardStore — Filter & Selection
// ═══════════════════════════════════════════════════════════════════

mod store_filter_selection {
    use super::*;

    #[test]
    fn test_empty_query_shows_everything() {
        let mut store = loaded_store(all_assets());
        for query in ["", "   "] {
            store.set_filter_query(query);
            assert_eq!(store.filtered_assets().len(), store.assets().len());
        }
    }

    #[test]
    fn test_filter_matches_name_or_symbol_case_insensitively() {
        let mut store = loaded_store(all_assets());

        store.set_filter_query("BIT");
        assert_eq!(ids(&store.filtered_assets()), vec!["bitcoin"]);

        store.set_filter_query("Eth");
        assert_eq!(ids(&store.filtered_assets()), vec!["ethereum"]);

        store.set_filter_query("o");
        assert_eq!(ids(&store.filtered_assets()), vec!["bitcoin", "solana", "dogecoin"]);

        store.set_filter_query("xyz");
        assert!(store.filtered_assets().is_empty());
    }

    #[test]
    fn test_filtered_view_partitions_the_list() {
        let mut store = loaded_store(all_assets());
        for query in ["b", "c", "oin", "SOL", "e", "zz", "do"] {
            store.set_filter_query(query);
            let needle = query.to_lowercase();
            let kept = ids(&store.filtered_assets());

            for asset in store.assets() {
                let matches = asset.name.to_lowercase().contains(&needle)
                    || asset.symbol.to_lowercase().contains(&needle);
                assert_eq!(kept.contains(&asset.id), matches, "query {query:?}, asset {}", asset.id);
            }

            // Subsequence of the list, order preserved
            let positions: Vec<usize> = kept
                .iter()
                .map(|id| store.assets().iter().position(|a| &a.id == id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_filter_survives_refresh() {
        let mut store = loaded_store(all_assets());
        store.set_filter_query("coin");
        assert_eq!(store.filtered_assets().len(), 2);

        let ticket = store.begin_refresh();
        store.apply_refresh(ticket, Ok(vec![btc(), eth()]));
        assert_eq!(store.filter_query(), "coin");
        assert_eq!(ids(&store.filtered_assets()), vec!["bitcoin"]);
    }

    #[test]
    fn test_filter_does_not_change_selection() {
        let mut store = loaded_store(all_assets());
        store.select_asset("ethereum");
        store.set_filter_query("doge");
        assert_eq!(store.selected_id(), Some("ethereum"));
    }

    #[test]
    fn test_select_asset() {
        let mut store = loaded_store(all_assets());
        assert!(store.select_asset("solana"));
        assert_eq!(store.selected_asset().map(|a| a.name.as_str()), Some("Solana"));

        // Re-selecting is not a change, unknown ids are ignored
        assert!(!store.select_asset("solana"));
        assert!(!store.select_asset("monero"));
        assert_eq!(store.selected_id(), Some("solana"));
    }

    #[test]
    fn test_selection_kept_when_still_listed() {
        let mut store = loaded_store(all_assets());
        store.select_asset("dogecoin");

        let ticket = store.begin_refresh();
        store.apply_refresh(ticket, Ok(vec![eth(), doge().with_change(9.0)]));
        assert_eq!(store.selected_id(), Some("dogecoin"));
        // Selected asset reflects the new snapshot
        assert_eq!(store.selected_asset().unwrap().price_change_percentage_24h, 9.0);
    }

    #[test]
    fn test_selection_never_dangles() {
        let mut store = loaded_store(all_assets());
        store.select_asset("dogecoin");

        let ticket = store.begin_refresh();
        store.apply_refresh(ticket, Ok(vec![sol(), eth()]));
        assert_eq!(store.selected_id(), Some("solana"));

        let ticket = store.begin_refresh();
        store.apply_refresh(ticket, Ok(Vec::new()));
        assert_eq!(store.selected_id(), None);
        assert!(store.selected_asset().is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// DashboardController Tests
// ═══════════════════════════════════════════════════════════════════

mod controller {
    use super::*;

    #[test]
    fn test_default_poll_interval() {
        assert_eq!(DEFAULT_POLL_INTERVAL, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_refresh_applies_result() {
        let source = Arc::new(ScriptedSource::default());
        let controller = DashboardController::new(source.clone());

        assert!(controller.refresh().await);
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.status, DashboardStatus::Ready);
        assert_eq!(snapshot.assets.len(), 4);
        assert_eq!(snapshot.selected.map(|a| a.id), Some("bitcoin".to_string()));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_user_input_goes_through_store() {
        let controller = DashboardController::new(Arc::new(ScriptedSource::default()));
        controller.refresh().await;

        controller.set_filter_query("sol");
        assert!(controller.select_asset("ethereum"));

        let (filtered, selected) =
            controller.read(|s| (ids(&s.filtered_assets()), s.selected_id().map(String::from)));
        assert_eq!(filtered, vec!["solana"]);
        assert_eq!(selected.as_deref(), Some("ethereum"));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_data() {
        let source = Arc::new(ScriptedSource::with(vec![
            Ok(all_assets()),
            Err(upstream_down()),
        ]));
        let controller = DashboardController::new(source);

        controller.refresh().await;
        controller.refresh().await;

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.status, DashboardStatus::Error);
        assert_eq!(snapshot.assets.len(), 4);
        assert!(snapshot.error.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_polling_refreshes_immediately_then_every_interval() {
        let source = Arc::new(ScriptedSource::default());
        let controller = DashboardController::new(source.clone());

        controller.start(Duration::from_secs(60));
        assert!(controller.is_polling());

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(source.calls(), 1);
        assert_eq!(controller.snapshot().status, DashboardStatus::Ready);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(source.calls(), 2);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(source.calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_polling() {
        let source = Arc::new(ScriptedSource::default());
        let controller = DashboardController::new(source.clone());

        controller.start(Duration::from_secs(60));
        tokio::time::sleep(Duration::from_millis(10)).await;
        controller.stop();
        assert!(!controller.is_polling());

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(source.calls(), 1);

        // Stopping twice is harmless
        controller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_mid_fetch_returns_to_ready() {
        let source = Arc::new(SlowSource::default());
        let controller = DashboardController::new(source.clone());
        assert!(controller.refresh().await);

        controller.start(Duration::from_secs(60));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(controller.snapshot().status, DashboardStatus::Refreshing);

        controller.stop();
        tokio::time::sleep(Duration::from_secs(600)).await;

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.status, DashboardStatus::Ready);
        assert!(!snapshot.refreshing);
        assert_eq!(snapshot.assets.len(), 4);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_before_first_load_clears_in_flight() {
        let controller = DashboardController::new(Arc::new(SlowSource::default()));

        controller.start(Duration::from_secs(60));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(controller.read(|s| s.is_refreshing()));

        controller.stop();
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert!(!controller.read(|s| s.is_refreshing()));
        assert_eq!(controller.snapshot().status, DashboardStatus::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_poller() {
        let source = Arc::new(ScriptedSource::default());
        let controller = DashboardController::new(source.clone());

        controller.start(Duration::from_secs(60));
        controller.start(Duration::from_secs(60));
        tokio::time::sleep(Duration::from_millis(10)).await;

        // Only the second poller is alive
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_polling() {
        let source = Arc::new(ScriptedSource::default());
        {
            let controller = DashboardController::new(source.clone());
            controller.start(Duration::from_secs(60));
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(source.calls(), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChartController Tests
// ═══════════════════════════════════════════════════════════════════

mod chart {
    use super::*;

    fn chart() -> (Arc<SlowHistory>, ChartController) {
        let source = Arc::new(SlowHistory::default());
        let controller = ChartController::new(source.clone());
        (source, controller)
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_asset_means_no_fetch() {
        let (source, chart) = chart();
        assert!(!chart.reload().await);
        assert!(source.requests.lock().unwrap().is_empty());
        assert_eq!(chart.view(), ChartView::Empty);
        assert_eq!(chart.view().message(), Some(NO_CHART_DATA));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_asset_fetches_default_timeframe() {
        let (source, chart) = chart();
        assert_eq!(chart.timeframe(), Timeframe::Week);

        assert!(chart.set_asset("ethereum").await);
        assert_eq!(
            *source.requests.lock().unwrap(),
            vec![("ethereum".to_string(), 7)]
        );

        match chart.view() {
            ChartView::Series(series) => {
                assert_eq!(series.len(), 3);
                assert_eq!(series.title, "Price History (7d)");
                assert_eq!(series.values, vec![100.0, 110.0, 7.0]);
            }
            other => panic!("expected series, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_refetches_only_on_change() {
        let (source, chart) = chart();
        chart.set_asset("ethereum").await;
        assert!(!chart.set_asset("ethereum").await);
        assert!(!chart.set_timeframe(Timeframe::Week).await);
        assert_eq!(source.requests.lock().unwrap().len(), 1);

        assert!(chart.set_timeframe(Timeframe::Month).await);
        assert!(chart.set_asset("solana").await);
        assert_eq!(
            *source.requests.lock().unwrap(),
            vec![
                ("ethereum".to_string(), 7),
                ("ethereum".to_string(), 30),
                ("solana".to_string(), 30),
            ]
        );

        // Forced reload always fetches
        assert!(chart.reload().await);
        assert_eq!(source.requests.lock().unwrap().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_while_in_flight() {
        let (_source, chart) = chart();
        let (applied, ()) = tokio::join!(chart.set_asset("bitcoin"), async {
            tokio::task::yield_now().await;
            assert!(chart.is_loading());
            assert_eq!(chart.view(), ChartView::Loading);
        });
        assert!(applied);
        assert!(!chart.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let (_source, chart) = chart();

        // Bitcoin takes 10s, Ethereum 1s: the older request lands last.
        let (slow, fast) = tokio::join!(chart.set_asset("bitcoin"), async {
            tokio::task::yield_now().await;
            chart.set_asset("ethereum").await
        });

        assert!(!slow);
        assert!(fast);
        assert_eq!(chart.asset_id().as_deref(), Some("ethereum"));
        assert!(chart.history().is_some());
        assert!(chart.error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_fetch_stops_loading() {
        let (_source, chart) = chart();

        // Bitcoin takes 10s; give up after one.
        let outcome =
            tokio::time::timeout(Duration::from_secs(1), chart.set_asset("bitcoin")).await;
        assert!(outcome.is_err());

        assert!(!chart.is_loading());
        assert_eq!(chart.view(), ChartView::Empty);

        // The next reload still applies.
        assert!(chart.reload().await);
        assert!(chart.history().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_shows_empty_chart() {
        let (_source, chart) = chart();
        chart.set_asset("ethereum").await;
        assert!(chart.set_asset("broken").await);

        assert!(chart.history().is_none());
        assert!(chart.error().is_some());
        assert_eq!(chart.view().message(), Some(NO_CHART_DATA));
    }
}

// ═══════════════════════════════════════════════════════════════════
// ConverterForm Tests
// ═══════════════════════════════════════════════════════════════════

mod converter_form {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 2.5 ").unwrap(), 2.5);
        for bad in ["", "abc", "0", "-3", "NaN", "inf"] {
            assert!(matches!(parse_amount(bad), Err(CoreError::InvalidAmount)), "{bad}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_defaults_to_one_usd_in_btc() {
        let form = form();
        assert_eq!(form.amount(), "1");
        assert_eq!(form.pair(), (Currency::Usd, Currency::Btc));
        assert!(form.result().is_none());

        assert!(form.recompute().await);
        let result = form.result().unwrap();
        assert!((result.result - 1.0 / 50_000.0).abs() < 1e-15);

        let view = form.view().unwrap();
        assert_eq!(view.result, "0.00002");
        assert_eq!(view.summary, "1 USD = 0.00002000 BTC");
    }

    #[tokio::test(start_paused = true)]
    async fn test_swap_reverses_pair() {
        let form = form();
        form.recompute().await;
        assert!(form.swap().await);

        assert_eq!(form.pair(), (Currency::Btc, Currency::Usd));
        assert_eq!(form.result().unwrap().result, 50_000.0);
        assert!(!form.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_amount_keeps_last_result() {
        let form = form();
        form.set_amount("2").await;
        let before = form.result();
        assert!(before.is_some());

        form.set_amount("not a number").await;
        assert_eq!(form.error().as_deref(), Some("Please enter a valid amount"));
        assert_eq!(form.result(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_rate_clears_result() {
        let form = form();
        form.recompute().await;

        // USD → EUR needs a fiat provider; none registered
        form.set_to(Currency::Eur).await;
        assert!(form.result().is_none());
        assert!(form.error().is_some());

        form.set_to(Currency::Btc).await;
        assert!(form.result().is_some());
        assert!(form.error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_lookup_stops_loading() {
        let form = form();

        // The first lookup takes 10s; give up after one.
        let outcome = tokio::time::timeout(Duration::from_secs(1), form.recompute()).await;
        assert!(outcome.is_err());
        assert!(!form.is_loading());
        assert!(form.result().is_none());

        assert!(form.recompute().await);
        assert!(form.result().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_edit_wins() {
        let form = form();

        // First lookup is slow, so the "5" answer arrives after the "7" one.
        let (first, second) = tokio::join!(form.set_amount("5"), async {
            tokio::task::yield_now().await;
            form.set_amount("7").await
        });

        assert!(!first);
        assert!(second);
        let result = form.result().unwrap();
        assert_eq!(result.amount, 7.0);
        assert!((result.result - 7.0 / 50_000.0).abs() < 1e-15);
    }
}
