//! Core library for Coin Dashboard.
//!
//! - `providers`: upstream market-data and exchange-rate APIs behind traits
//! - `services`: caching market service and the currency converter
//! - `dashboard`: listing/selection/filter state, chart and converter controllers
//! - `views`: display-ready view models derived from that state

pub mod dashboard;
pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod views;

pub use errors::CoreError;
pub use models::{
    asset::Asset,
    conversion::Conversion,
    currency::Currency,
    history::{PriceHistory, PricePoint},
    timeframe::Timeframe,
};
pub use services::{
    converter_service::ConverterService,
    market_service::{MarketService, MarketServiceConfig},
};

#[cfg(not(target_arch = "wasm32"))]
pub use dashboard::controller::DashboardController;
pub use dashboard::{
    chart::ChartController,
    converter_form::ConverterForm,
    source::{AssetSource, HistorySource, ProxyClient, TopMarkets},
    store::{DashboardSnapshot, DashboardStatus, DashboardStore},
};
