use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub google_places_api_key: String,
    pub places_base_url: String,
    /// Appended to every text search, e.g. "hotels hostels in Lyon France"
    pub search_country: String,
    pub max_api_calls: u64,
    pub max_candidates: usize,
    pub export_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://hotels.db".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            google_places_api_key: env::var("GOOGLE_PLACES_API_KEY")
                .context("GOOGLE_PLACES_API_KEY must be set")?,
            places_base_url: env::var("PLACES_BASE_URL")
                .unwrap_or_else(|_| "https://maps.googleapis.com/maps/api/place".to_string()),
            search_country: env::var("SEARCH_COUNTRY").unwrap_or_else(|_| "France".to_string()),
            max_api_calls: env::var("MAX_API_CALLS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("MAX_API_CALLS must be a valid number")?,
            max_candidates: env::var("MAX_CANDIDATES")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("MAX_CANDIDATES must be a valid number")?,
            export_dir: env::var("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        })
    }
}
