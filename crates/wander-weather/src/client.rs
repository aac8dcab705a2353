//! Forecast API client.

use tracing::instrument;

use wander_store::Coordinates;

use crate::error::WeatherError;
use crate::types::ForecastResponse;

#[derive(Clone)]
pub struct ForecastClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ForecastClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Fetch the forecast for a coordinate pair.
    #[instrument(skip(self), level = "info")]
    pub async fn forecast(&self, coordinates: &Coordinates) -> Result<ForecastResponse, WeatherError> {
        // The key is a path segment here, not a query parameter
        let url = format!(
            "{}/forecast/{}/{},{}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            coordinates.latitude,
            coordinates.longitude,
        );

        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, WeatherError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| WeatherError::ApiError(format!("JSON parse error: {}", e)))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(WeatherError::ApiError(format!("{}: {}", status, text)))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_forecast() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast/test-key/47.6062,-122.3321"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": 47.6062,
                "longitude": -122.3321,
                "daily": {
                    "data": [{"summary": "Partly cloudy.", "time": 1555129613}]
                }
            })))
            .mount(&mock_server)
            .await;

        let client = ForecastClient::new(&mock_server.uri(), "test-key");
        let response = client
            .forecast(&Coordinates {
                latitude: 47.6062,
                longitude: -122.3321,
            })
            .await
            .unwrap();

        assert_eq!(response.daily.data.len(), 1);
        assert_eq!(response.daily.data[0].summary, "Partly cloudy.");
    }

    #[tokio::test]
    async fn test_forecast_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("bad key"))
            .mount(&mock_server)
            .await;

        let client = ForecastClient::new(&mock_server.uri(), "bad-key");
        let result = client
            .forecast(&Coordinates {
                latitude: 47.6,
                longitude: -122.3,
            })
            .await;

        assert!(matches!(result, Err(WeatherError::ApiError(_))));
    }
}
