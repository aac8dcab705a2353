//! Read-through accessor for nearby events.

use tracing::instrument;

use wander_store::{Coordinates, EventRecord, StoreHandle};

use crate::client::EventsClient;
use crate::error::EventsError;
use crate::types::records_from_response;

/// Serves event lookups from the store, searching upstream on a miss.
///
/// A hit is any non-empty set of rows for the coordinate pair. Fetched
/// rows are written back in the background, one insert per event.
#[derive(Clone)]
pub struct EventsService {
    store: StoreHandle,
    client: EventsClient,
}

impl EventsService {
    pub fn new(store: StoreHandle, client: EventsClient) -> Self {
        Self { store, client }
    }

    /// Look up events around a coordinate pair.
    #[instrument(skip(self), level = "info")]
    pub async fn lookup(&self, coordinates: &Coordinates) -> Result<Vec<EventRecord>, EventsError> {
        let rows = self
            .store
            .find_events(coordinates.latitude, coordinates.longitude)
            .await?;
        if !rows.is_empty() {
            tracing::debug!("Events cache hit for {:?}", coordinates);
            return Ok(rows);
        }

        tracing::info!("Events cache miss for {:?}, searching upstream", coordinates);
        let response = self.client.search(coordinates).await?;
        let records = records_from_response(coordinates, response)?;

        for record in &records {
            let store = self.store.clone();
            let pending = record.clone();
            tokio::spawn(async move {
                if let Err(e) = store.insert_event(pending).await {
                    tracing::warn!("Failed to persist event row: {}", e);
                }
            });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use std::time::Duration;
    use wander_store::Store;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COORDINATES: Coordinates = Coordinates {
        latitude: 47.6062,
        longitude: -122.3321,
    };

    fn create_store() -> StoreHandle {
        StoreHandle::new(Store::in_memory().expect("Failed to create in-memory store"))
    }

    fn events_body(count: usize) -> serde_json::Value {
        let events: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "url": format!("https://example.com/e/{}", i),
                    "name": {"text": format!("Event {}", i)},
                    "start": {"utc": "2019-05-01T19:00:00Z"},
                    "summary": "Something happening"
                })
            })
            .collect();
        serde_json::json!({ "events": events })
    }

    async fn wait_for_rows(store: &StoreHandle, expected: usize) -> Vec<EventRecord> {
        for _ in 0..50 {
            let rows = store
                .find_events(COORDINATES.latitude, COORDINATES.longitude)
                .await
                .unwrap();
            if rows.len() >= expected {
                return rows;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        Vec::new()
    }

    #[tokio::test]
    async fn test_miss_fetches_and_persists_each_event() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events/search"))
            .and(query_param("location.latitude", "47.6062"))
            .respond_with(ResponseTemplate::new(200).set_body_json(events_body(2)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = create_store();
        let service = EventsService::new(
            store.clone(),
            EventsClient::new(&mock_server.uri(), "test-key"),
        );

        let records = service.lookup(&COORDINATES).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].event_date, "Wed May 01 2019");
        assert_eq!(records[0].latitude, COORDINATES.latitude);

        let persisted = wait_for_rows(&store, 2).await;
        assert_eq!(persisted.len(), 2);
    }

    #[tokio::test]
    async fn test_hit_skips_upstream() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(events_body(1)))
            .expect(0)
            .mount(&mock_server)
            .await;

        let store = create_store();
        store
            .insert_event(EventRecord {
                link: "https://example.com/e/stored".to_string(),
                name: "Stored event".to_string(),
                event_date: "Wed May 01 2019".to_string(),
                summary: None,
                latitude: COORDINATES.latitude,
                longitude: COORDINATES.longitude,
            })
            .await
            .unwrap();

        let service =
            EventsService::new(store, EventsClient::new(&mock_server.uri(), "test-key"));
        let records = service.lookup(&COORDINATES).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Stored event");
    }

    #[tokio::test]
    async fn test_caps_upstream_events() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(events_body(25)))
            .mount(&mock_server)
            .await;

        let store = create_store();
        let service = EventsService::new(
            store.clone(),
            EventsClient::new(&mock_server.uri(), "test-key"),
        );

        let records = service.lookup(&COORDINATES).await.unwrap();
        assert_eq!(records.len(), 21);

        let persisted = wait_for_rows(&store, 21).await;
        assert_eq!(persisted.len(), 21);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let store = create_store();
        let service =
            EventsService::new(store, EventsClient::new(&mock_server.uri(), "test-key"));

        assert!(service.lookup(&COORDINATES).await.is_err());
    }
}
