//! Geocoding API client.

use tracing::instrument;

use crate::error::LocationError;
use crate::types::GeocodeResponse;

#[derive(Clone)]
pub struct GeocodeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Geocode a free-form search string.
    #[instrument(skip(self), level = "info")]
    pub async fn geocode(&self, search_query: &str) -> Result<GeocodeResponse, LocationError> {
        let url = format!(
            "{}/json?address={}&key={}",
            self.base_url,
            urlencoding::encode(search_query),
            urlencoding::encode(&self.api_key),
        );

        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, LocationError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| LocationError::ApiError(format!("JSON parse error: {}", e)))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(LocationError::ApiError(format!("{}: {}", status, text)))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_geocode() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json"))
            .and(query_param("address", "seattle wa"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{
                    "formatted_address": "Seattle, WA, USA",
                    "geometry": {"location": {"lat": 47.6062, "lng": -122.3321}}
                }]
            })))
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new(&mock_server.uri(), "test-key");
        let response = client.geocode("seattle wa").await.unwrap();

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].formatted_address, "Seattle, WA, USA");
    }

    #[tokio::test]
    async fn test_geocode_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new(&mock_server.uri(), "test-key");
        let result = client.geocode("seattle").await;

        assert!(matches!(result, Err(LocationError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_geocode_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new(&mock_server.uri(), "test-key");
        let result = client.geocode("seattle").await;

        assert!(matches!(result, Err(LocationError::ApiError(_))));
    }
}
