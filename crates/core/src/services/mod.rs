pub mod cache;
pub mod converter_service;
pub mod market_service;
