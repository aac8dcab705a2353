//! Location-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocationError {
    #[error("No geocoding results for {0:?}")]
    NoResults(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Store error: {0}")]
    StoreError(#[from] anyhow::Error),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}
