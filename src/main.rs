use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod config;
mod deal_finder;
mod error;
mod extractor;
mod fetcher;
mod models;
mod query;
mod routes;
mod traits;

use catalog::Catalog;
use config::AppConfig;
use deal_finder::DealFinder;
use fetcher::HttpFetcher;
use traits::ScraperConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,deal_finder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Deal Finder");

    let fetcher = HttpFetcher::new(&config)?;
    let finder = DealFinder::new(Arc::new(fetcher), ScraperConfig::takealot())?;
    info!("Searching {} with a {:?} fetch timeout", finder.site_name(), config.fetch_timeout);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on {}", config.addr);

    axum::serve(listener, routes::router(finder, Catalog::demo()))
        .await
        .context("Server error")?;

    Ok(())
}
