//! Event search API client.

use tracing::instrument;

use wander_store::Coordinates;

use crate::error::EventsError;
use crate::types::EventsResponse;

#[derive(Clone)]
pub struct EventsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EventsClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Search for events around a coordinate pair.
    #[instrument(skip(self), level = "info")]
    pub async fn search(&self, coordinates: &Coordinates) -> Result<EventsResponse, EventsError> {
        let url = format!(
            "{}/events/search?location.latitude={}&location.longitude={}&expand=venue&token={}",
            self.base_url,
            coordinates.latitude,
            coordinates.longitude,
            urlencoding::encode(&self.api_key),
        );

        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, EventsError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| EventsError::ApiError(format!("JSON parse error: {}", e)))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(EventsError::ApiError(format!("{}: {}", status, text)))
        }
    }
}
