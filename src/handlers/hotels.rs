use std::time::Instant;

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use futures::future::try_join_all;
use tracing::{info, warn};

use crate::app::AppState;
use crate::export::{export_file_name, scratch_path, write_workbook, XLSX_CONTENT_TYPE};
use crate::handlers::AppError;
use crate::models::{Hotel, EMAIL_SENTINEL};
use crate::places::types::Candidate;
use crate::places::PlacesError;

/// `GET /fetch_hotels/:city`
///
/// Searches for hotels in `city`, enriches the first candidates with place
/// details and a scraped email, stores them, and answers with an `.xlsx`
/// attachment. The spreadsheet is removed from disk before responding.
pub async fn fetch_hotels(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Response, AppError> {
    if !state.budget.try_acquire() {
        info!("API call limit reached");
        return Err(AppError::RateLimited);
    }

    let started = Instant::now();

    info!("Making initial text search call for {}", city);
    let candidates = state
        .places
        .text_search(&city, &state.search_country)
        .await
        .map_err(|e| refund_failed_call(&state, e))?;
    info!(
        "Initial API call complete. API call count: {}",
        state.budget.used()
    );

    let candidates: Vec<Candidate> = candidates
        .into_iter()
        .take(state.max_candidates)
        .collect();
    info!("Processing {} places", candidates.len());

    let hotels = try_join_all(
        candidates
            .iter()
            .map(|candidate| enrich_candidate(&state, &city, candidate)),
    )
    .await?
    .into_iter()
    .flatten()
    .collect::<Vec<Hotel>>();

    info!(
        "Fetched {} hotels for {} in {:.2?}",
        hotels.len(),
        city,
        started.elapsed()
    );
    if state.budget.is_exhausted() {
        warn!("API call budget of {} calls is used up", state.budget.max());
    }

    let file_name = export_file_name(&city);
    let path = scratch_path(&state.export_dir, &file_name);

    let write_path = path.clone();
    tokio::task::spawn_blocking(move || write_workbook(&write_path, &hotels))
        .await
        .context("Spreadsheet task failed")??;
    info!("Excel file created: {}", path.display());

    let contents = tokio::fs::read(&path).await;

    match tokio::fs::remove_file(&path).await {
        Ok(()) => info!("Excel file deleted: {}", path.display()),
        Err(e) => warn!("Failed to delete {}: {}", path.display(), e),
    }

    let bytes = contents.map_err(AppError::SendFile)?;

    info!("Request processing complete for city: {}", city);

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Fetch details, scrape an email and persist one candidate.
///
/// Returns `Ok(None)` when the budget ran out before the details call; such
/// candidates are dropped from the export.
async fn enrich_candidate(
    state: &AppState,
    city: &str,
    candidate: &Candidate,
) -> Result<Option<Hotel>, AppError> {
    if !state.budget.try_acquire() {
        info!(
            "API call limit reached during details fetching, skipping {}",
            candidate.place_id
        );
        return Ok(None);
    }

    info!(
        "Fetching details for {} (place_id: {})",
        candidate.name, candidate.place_id
    );
    let details = state
        .places
        .place_details(&candidate.place_id)
        .await
        .map_err(|e| refund_failed_call(state, e))?;
    info!(
        "Fetched details for place_id: {}. API call count: {}",
        candidate.place_id,
        state.budget.used()
    );

    let photo_url = details
        .photos
        .first()
        .map(|photo| state.places.photo_url(&photo.photo_reference))
        .unwrap_or_default();

    let hotel = Hotel::from_details(details, photo_url, city);

    let email = state.scraper.find_email(hotel.website()).await;
    info!(
        "Scraped email for {}: {}",
        hotel.name,
        email.as_deref().unwrap_or(EMAIL_SENTINEL)
    );
    let hotel = hotel.with_email(email);

    state.store.insert(&hotel).await?;
    info!("Saved hotel: {}", hotel.name);

    Ok(Some(hotel))
}

/// Calls that failed in transport or with an HTTP error are not counted
fn refund_failed_call(state: &AppState, err: PlacesError) -> PlacesError {
    if err.request_failed() {
        state.budget.release();
    }
    err
}
