//! Coin Dashboard proxy server

use clap::Parser;
use coin_dashboard_server::{serve, AppState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "coin_dashboard_server=info,coin_dashboard_core=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();

    tracing::info!("Coin Dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        tracked = config.tracked_ids.len(),
        listing_ttl_secs = config.listing_ttl_secs,
        history_ttl_secs = config.history_ttl_secs,
        "Upstream: {}",
        config.coingecko_url
    );

    let state = AppState::from_config(&config);
    serve(state, &config).await?;

    Ok(())
}
