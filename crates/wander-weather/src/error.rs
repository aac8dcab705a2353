//! Weather-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Store error: {0}")]
    StoreError(#[from] anyhow::Error),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}
