//! Read-through accessor for daily forecasts.

use tracing::instrument;

use wander_store::{Coordinates, StoreHandle, WeatherRecord};

use crate::client::ForecastClient;
use crate::error::WeatherError;
use crate::types::records_from_response;

/// Serves forecast lookups from the store, fetching upstream on a miss.
///
/// A hit is any non-empty set of rows for the coordinate pair. Fetched
/// rows are written back in the background, one insert per forecast day.
#[derive(Clone)]
pub struct WeatherService {
    store: StoreHandle,
    client: ForecastClient,
}

impl WeatherService {
    pub fn new(store: StoreHandle, client: ForecastClient) -> Self {
        Self { store, client }
    }

    /// Look up the forecast for a coordinate pair.
    #[instrument(skip(self), level = "info")]
    pub async fn lookup(&self, coordinates: &Coordinates) -> Result<Vec<WeatherRecord>, WeatherError> {
        let rows = self
            .store
            .find_weather(coordinates.latitude, coordinates.longitude)
            .await?;
        if !rows.is_empty() {
            tracing::debug!("Weather cache hit for {:?}", coordinates);
            return Ok(rows);
        }

        tracing::info!("Weather cache miss for {:?}, fetching forecast", coordinates);
        let response = self.client.forecast(coordinates).await?;
        let records = records_from_response(response);

        for record in &records {
            let store = self.store.clone();
            let pending = record.clone();
            tokio::spawn(async move {
                if let Err(e) = store.insert_weather(pending).await {
                    tracing::warn!("Failed to persist weather row: {}", e);
                }
            });
        }

        Ok(records)
    }
}
