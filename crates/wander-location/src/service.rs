//! Read-through accessor for geocoded locations.

use tracing::instrument;

use wander_store::{LocationRecord, StoreHandle};

use crate::client::GeocodeClient;
use crate::error::LocationError;
use crate::types::location_from_response;

/// Serves location lookups from the store, geocoding on a miss.
///
/// Fetched records are written back in the background; the response never
/// waits on the insert, and insert failures are only logged.
#[derive(Clone)]
pub struct LocationService {
    store: StoreHandle,
    client: GeocodeClient,
}

impl LocationService {
    pub fn new(store: StoreHandle, client: GeocodeClient) -> Self {
        Self { store, client }
    }

    /// Look up a location by free-form search text.
    #[instrument(skip(self), level = "info")]
    pub async fn lookup(&self, search_query: &str) -> Result<LocationRecord, LocationError> {
        if let Some(record) = self.store.find_location(search_query).await? {
            tracing::debug!("Location cache hit for {:?}", search_query);
            return Ok(record);
        }

        tracing::info!("Location cache miss for {:?}, geocoding", search_query);
        let response = self.client.geocode(search_query).await?;
        let record = location_from_response(search_query, response)?;

        let store = self.store.clone();
        let pending = record.clone();
        tokio::spawn(async move {
            let search_query = pending.search_query.clone();
            if let Err(e) = store.insert_location(pending).await {
                tracing::warn!("Failed to persist location {:?}: {}", search_query, e);
            }
        });

        Ok(record)
    }
}
