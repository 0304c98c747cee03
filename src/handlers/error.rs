use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::places::PlacesError;

/// Failures surfaced to HTTP callers as plain-text responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("API call limit reached")]
    RateLimited,

    #[error("Error fetching data from Google Places API")]
    Upstream(#[source] PlacesError),

    #[error("Error sending file")]
    SendFile(#[source] std::io::Error),

    #[error("An error occurred while fetching hotel data.")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Upstream(_) | AppError::SendFile(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Only a failed text search is reported as an upstream error; failures on
/// individual places fall through to the generic message.
impl From<PlacesError> for AppError {
    fn from(err: PlacesError) -> Self {
        match err {
            PlacesError::Status { .. } => AppError::Upstream(err),
            other => AppError::Internal(other.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::RateLimited => {}
            AppError::Upstream(e) => error!("Error fetching data from Google Places API: {}", e),
            AppError::SendFile(e) => error!("Error sending file: {}", e),
            AppError::Internal(e) => error!("Error occurred: {:#}", e),
        }

        (self.status_code(), self.to_string()).into_response()
    }
}
