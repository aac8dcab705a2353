//! Event search API response types and mapping into stored records.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use wander_store::{Coordinates, EventRecord};

use crate::error::EventsError;

/// Upstream events beyond this count are dropped before mapping.
pub const EVENT_FETCH_LIMIT: usize = 21;

/// Top-level event search response.
#[derive(Debug, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<ApiEvent>,
}

#[derive(Debug, Deserialize)]
pub struct ApiEvent {
    pub url: String,
    pub name: EventName,
    pub start: EventStart,
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EventName {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct EventStart {
    pub utc: String,
}

/// Map an event search response onto stored records.
///
/// The response carries no coordinates of its own, so every record is
/// stamped with the coordinates that were searched.
pub fn records_from_response(
    coordinates: &Coordinates,
    response: EventsResponse,
) -> Result<Vec<EventRecord>, EventsError> {
    response
        .events
        .into_iter()
        .take(EVENT_FETCH_LIMIT)
        .map(|event| {
            let event_date = display_date(&event.start.utc)?;
            Ok(EventRecord {
                link: event.url,
                name: event.name.text,
                event_date,
                summary: event.summary,
                latitude: coordinates.latitude,
                longitude: coordinates.longitude,
            })
        })
        .collect()
}

/// Render an RFC 3339 start time as a display date like "Wed May 01 2019".
fn display_date(utc: &str) -> Result<String, EventsError> {
    let parsed = DateTime::parse_from_rfc3339(utc)
        .map_err(|_| EventsError::InvalidDate(utc.to_string()))?;
    Ok(parsed.with_timezone(&Utc).format("%a %b %d %Y").to_string())
}
