use anyhow::{Context, Result};
use reqwest::{Client, Url};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::places::types::{
    Candidate, DetailsResponse, PlaceDetails, TextSearchResponse, STATUS_OK,
};

/// Width requested for photo URLs
const PHOTO_MAX_WIDTH: &str = "400";

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error(
        "Places API returned status {status}: {}",
        .message.as_deref().unwrap_or("no message")
    )]
    Status {
        status: String,
        message: Option<String>,
    },

    #[error("Places API returned status {status} for place {place_id}")]
    DetailsStatus { place_id: String, status: String },

    #[error("Places API returned no result for place {0}")]
    MissingResult(String),

    #[error("Places API request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl PlacesError {
    /// True for transport failures and HTTP error statuses. Such calls are
    /// not counted against the call budget.
    pub fn request_failed(&self) -> bool {
        matches!(self, PlacesError::Http(e) if !e.is_decode())
    }
}

/// Client for the Google Places text search and details endpoints
#[derive(Clone)]
pub struct PlacesClient {
    client: Client,
    base_url: String,
    photo_endpoint: Url,
    api_key: String,
}

impl PlacesClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();

        let photo_endpoint = Url::parse(&format!("{}/photo", base_url))
            .with_context(|| format!("Invalid Places API base URL: {}", base_url))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            photo_endpoint,
            api_key: api_key.into(),
        })
    }

    /// Search for hotels and hostels in `city`. Any status other than `OK`
    /// (including `ZERO_RESULTS`) is an error.
    pub async fn text_search(
        &self,
        city: &str,
        country: &str,
    ) -> Result<Vec<Candidate>, PlacesError> {
        let query = format!("hotels hostels in {} {}", city, country);
        debug!("Text search: {}", query);

        let response: TextSearchResponse = self
            .client
            .get(format!("{}/textsearch/json", self.base_url))
            .query(&[("query", query.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.status != STATUS_OK {
            warn!(
                "Text search returned status {}: {}",
                response.status,
                response.error_message.as_deref().unwrap_or("no message")
            );
            return Err(PlacesError::Status {
                status: response.status,
                message: response.error_message,
            });
        }

        debug!("Text search returned {} results", response.results.len());
        Ok(response.results)
    }

    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let response: DetailsResponse = self
            .client
            .get(format!("{}/details/json", self.base_url))
            .query(&[("place_id", place_id), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.status != STATUS_OK {
            return Err(PlacesError::DetailsStatus {
                place_id: place_id.to_string(),
                status: response.status,
            });
        }

        response
            .result
            .ok_or_else(|| PlacesError::MissingResult(place_id.to_string()))
    }

    /// Public URL for a photo reference token
    pub fn photo_url(&self, photo_reference: &str) -> String {
        let mut url = self.photo_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("maxwidth", PHOTO_MAX_WIDTH)
            .append_pair("photoreference", photo_reference)
            .append_pair("key", &self.api_key);
        url.to_string()
    }
}
