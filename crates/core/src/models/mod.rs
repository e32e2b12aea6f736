pub mod asset;
pub mod conversion;
pub mod currency;
pub mod history;
pub mod timeframe;
