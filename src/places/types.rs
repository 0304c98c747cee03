use serde::Deserialize;

/// Status value the Places API returns for a successful call
pub const STATUS_OK: &str = "OK";

/// Response body of `textsearch/json`
#[derive(Debug, Clone, Deserialize)]
pub struct TextSearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<Candidate>,
    pub error_message: Option<String>,
}

/// A text search hit, before enrichment
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub place_id: String,
    #[serde(default)]
    pub name: String,
}

/// Response body of `details/json`
#[derive(Debug, Clone, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    pub result: Option<PlaceDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub formatted_address: String,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub place_id: String,
    #[serde(default)]
    pub photos: Vec<PlacePhoto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacePhoto {
    pub photo_reference: String,
}
