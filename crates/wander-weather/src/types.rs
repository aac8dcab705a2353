//! Forecast API response types and mapping into stored records.

use chrono::DateTime;
use serde::Deserialize;

use wander_store::WeatherRecord;

/// Top-level forecast response.
///
/// The upstream echoes the requested coordinates back; those echoed values
/// are what get stored, not the ones from the request.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub daily: DailyForecast,
}

#[derive(Debug, Deserialize)]
pub struct DailyForecast {
    pub data: Vec<DailyEntry>,
}

/// One day of the daily forecast block.
#[derive(Debug, Deserialize)]
pub struct DailyEntry {
    pub summary: String,
    /// Unix timestamp in seconds
    pub time: i64,
}

/// Map a forecast response onto stored records, one per forecast day.
pub fn records_from_response(response: ForecastResponse) -> Vec<WeatherRecord> {
    let ForecastResponse {
        latitude,
        longitude,
        daily,
    } = response;

    daily
        .data
        .into_iter()
        .map(|day| WeatherRecord {
            forecast: day.summary,
            time: display_date(day.time),
            latitude,
            longitude,
        })
        .collect()
}

/// Render a unix timestamp as a display date like "Sat Apr 13 2019".
fn display_date(unix_seconds: i64) -> String {
    DateTime::from_timestamp(unix_seconds, 0)
        .unwrap_or_default()
        .format("%a %b %d %Y")
        .to_string()
}
