//! Geocoding API response types and mapping into stored records.

use serde::Deserialize;

use wander_store::LocationRecord;

use crate::error::LocationError;

/// Top-level geocoding response.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: GeoPoint,
}

#[derive(Debug, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Map a geocoding response onto a stored record.
///
/// Only the first result is kept, matching how lookups are served later.
pub fn location_from_response(
    search_query: &str,
    response: GeocodeResponse,
) -> Result<LocationRecord, LocationError> {
    let first = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| LocationError::NoResults(search_query.to_string()))?;

    Ok(LocationRecord {
        search_query: search_query.to_string(),
        formatted_query: first.formatted_address,
        latitude: first.geometry.location.lat,
        longitude: first.geometry.location.lng,
    })
}
