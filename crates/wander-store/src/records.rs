//! Record types shared across the cached accessors.

use serde::{Deserialize, Serialize};

/// A geocoded place, keyed by the raw search text that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One day of forecast for a coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub forecast: String,
    /// Display date, e.g. "Sat Apr 13 2019"
    pub time: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A single event near a coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub link: String,
    pub name: String,
    /// Display date, e.g. "Wed May 01 2019"
    pub event_date: String,
    pub summary: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// A latitude/longitude pair as submitted by clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_event_record_serializes_missing_summary_as_null() {
        let record = EventRecord {
            link: "https://example.com/e/1".to_string(),
            name: "Concert".to_string(),
            event_date: "Wed May 01 2019".to_string(),
            summary: None,
            latitude: 47.6,
            longitude: -122.3,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["summary"], serde_json::Value::Null);
        assert_eq!(json["link"], "https://example.com/e/1");
        assert_eq!(json["event_date"], "Wed May 01 2019");
    }

    #[test]
    fn test_coordinates_parse_from_json() {
        let coordinates: Coordinates =
            serde_json::from_str(r#"{"latitude":47.6,"longitude":-122.3}"#).unwrap();
        assert_eq!(coordinates.latitude, 47.6);
        assert_eq!(coordinates.longitude, -122.3);
    }

    #[test]
    fn test_coordinates_reject_non_numeric() {
        let result = serde_json::from_str::<Coordinates>(r#"{"latitude":"47.6","longitude":-122.3}"#);
        assert!(result.is_err());
    }
}
