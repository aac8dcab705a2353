//! Async wrapper around the blocking SQLite store.

use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;

use crate::records::{EventRecord, LocationRecord, WeatherRecord};
use crate::store::Store;

/// Cloneable handle that runs store calls on the blocking thread pool.
///
/// Every accessor service holds one of these, so all of them share a
/// single underlying connection.
#[derive(Clone)]
pub struct StoreHandle {
    store: Arc<Mutex<Store>>,
}

impl StoreHandle {
    /// Wrap a store for shared async use.
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Fetch the first stored location matching the search text.
    pub async fn find_location(&self, search_query: &str) -> Result<Option<LocationRecord>> {
        let store = self.store.clone();
        let search_query = search_query.to_string();
        tokio::task::spawn_blocking(move || store.lock().find_location(&search_query)).await?
    }

    /// Store a location lookup.
    pub async fn insert_location(&self, record: LocationRecord) -> Result<()> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.lock().insert_location(&record)).await?
    }

    /// List every stored forecast entry for the coordinate pair.
    pub async fn find_weather(&self, latitude: f64, longitude: f64) -> Result<Vec<WeatherRecord>> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.lock().find_weather(latitude, longitude)).await?
    }

    /// Store one forecast entry.
    pub async fn insert_weather(&self, record: WeatherRecord) -> Result<()> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.lock().insert_weather(&record)).await?
    }

    /// List every stored event for the coordinate pair.
    pub async fn find_events(&self, latitude: f64, longitude: f64) -> Result<Vec<EventRecord>> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.lock().find_events(latitude, longitude)).await?
    }

    /// Store one event.
    pub async fn insert_event(&self, record: EventRecord) -> Result<()> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.lock().insert_event(&record)).await?
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn create_handle() -> StoreHandle {
        let store = Store::in_memory().expect("Failed to create in-memory store");
        StoreHandle::new(store)
    }

    #[tokio::test]
    async fn test_location_roundtrip() {
        let handle = create_handle();
        let record = LocationRecord {
            search_query: "seattle".to_string(),
            formatted_query: "Seattle, WA, USA".to_string(),
            latitude: 47.6062,
            longitude: -122.3321,
        };

        handle.insert_location(record.clone()).await.unwrap();
        let found = handle.find_location("seattle").await.unwrap().unwrap();
        assert_eq!(found, record);
    }

    #[tokio::test]
    async fn test_weather_roundtrip_through_clone() {
        let handle = create_handle();
        let writer = handle.clone();

        writer
            .insert_weather(WeatherRecord {
                forecast: "Cloudy".to_string(),
                time: "Sat Apr 13 2019".to_string(),
                latitude: 47.6,
                longitude: -122.3,
            })
            .await
            .unwrap();

        let rows = handle.find_weather(47.6, -122.3).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].forecast, "Cloudy");
    }
}
