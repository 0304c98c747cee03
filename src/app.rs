//! Application state and router setup.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::db::HotelStore;
use crate::handlers;
use crate::places::{ApiBudget, PlacesClient};
use crate::scrapers::EmailScraper;

/// Shared application state, cloned into every request
#[derive(Clone)]
pub struct AppState {
    pub places: PlacesClient,
    pub scraper: Arc<dyn EmailScraper>,
    pub store: HotelStore,
    pub budget: Arc<ApiBudget>,
    pub search_country: String,
    pub max_candidates: usize,
    pub export_dir: PathBuf,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/fetch_hotels/:city", get(handlers::hotels::fetch_hotels))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
