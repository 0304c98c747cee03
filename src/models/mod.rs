use chrono::{DateTime, Utc};

use crate::places::types::PlaceDetails;

/// Stored in place of an email when none could be scraped
pub const EMAIL_SENTINEL: &str = "null";

/// Enriched hotel record: place details plus the scraped contact email
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Hotel {
    pub name: String,
    pub address: String,
    pub website_url: String,
    pub rating: f64,
    pub place_id: String,
    pub photo_url: String,
    pub email: String,
    /// City of the request that produced this record
    pub city: String,
    pub scraped_at: DateTime<Utc>,
}

impl Hotel {
    /// Build a record from a place-details response. The email starts out as
    /// the sentinel until [`Hotel::with_email`] attaches a scraped one.
    pub fn from_details(details: PlaceDetails, photo_url: String, city: &str) -> Self {
        Self {
            name: details.name,
            address: details.formatted_address,
            website_url: details.website.unwrap_or_default(),
            rating: details.rating.unwrap_or(0.0),
            place_id: details.place_id,
            photo_url,
            email: EMAIL_SENTINEL.to_string(),
            city: city.to_string(),
            scraped_at: Utc::now(),
        }
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email.unwrap_or_else(|| EMAIL_SENTINEL.to_string());
        self
    }

    pub fn website(&self) -> Option<&str> {
        if self.website_url.is_empty() {
            None
        } else {
            Some(&self.website_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::types::PlacePhoto;

    fn details() -> PlaceDetails {
        PlaceDetails {
            name: "Hôtel du Louvre".to_string(),
            formatted_address: "Place André Malraux, 75001 Paris".to_string(),
            website: None,
            rating: None,
            place_id: "ChIJ-louvre".to_string(),
            photos: vec![PlacePhoto {
                photo_reference: "ref-1".to_string(),
            }],
        }
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let hotel = Hotel::from_details(details(), String::new(), "Paris");

        assert_eq!(hotel.website_url, "");
        assert_eq!(hotel.rating, 0.0);
        assert_eq!(hotel.email, EMAIL_SENTINEL);
        assert_eq!(hotel.city, "Paris");
        assert!(hotel.website().is_none());
    }

    #[test]
    fn with_email_never_leaves_email_empty() {
        let hotel = Hotel::from_details(details(), String::new(), "Paris");

        let found = hotel.clone().with_email(Some("contact@louvre.fr".to_string()));
        assert_eq!(found.email, "contact@louvre.fr");

        let missing = hotel.with_email(None);
        assert_eq!(missing.email, "null");
    }
}
