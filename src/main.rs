mod app;
mod config;
mod db;
mod export;
mod handlers;
mod models;
mod places;
mod scrapers;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::{build_app, AppState};
use config::Config;
use db::HotelStore;
use places::{ApiBudget, PlacesClient};
use scrapers::{BrowserEmailScraper, EmailScraper};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hotel_scout=debug,sqlx=warn".into()),
        )
        .init();

    info!("🏨 Hotel Scout");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded");

    info!("Connecting to database...");
    let store = HotelStore::new(&config.database_url).await?;
    info!("Connected to database");

    tokio::fs::create_dir_all(&config.export_dir)
        .await
        .with_context(|| format!("Failed to create {}", config.export_dir.display()))?;

    let places = PlacesClient::new(&config.places_base_url, config.google_places_api_key.clone())?;
    let scraper = BrowserEmailScraper::new();
    let budget = Arc::new(ApiBudget::new(config.max_api_calls));

    info!(
        "API budget: {} calls, {} candidates per request, email scraping via {}",
        budget.max(),
        config.max_candidates,
        scraper.backend_name()
    );

    let app = build_app(AppState {
        places,
        scraper: Arc::new(scraper),
        store,
        budget,
        search_country: config.search_country,
        max_candidates: config.max_candidates,
        export_dir: config.export_dir,
    });

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    info!("Server is running on port {}", config.port);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
