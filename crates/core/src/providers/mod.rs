pub mod registry;
pub mod traits;

// API provider implementations
pub mod coinbase;
pub mod coingecko;
pub mod exchangerate_host;
