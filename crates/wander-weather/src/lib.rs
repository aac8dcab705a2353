//! Weather accessor: daily forecasts behind a read-through cache.

pub mod client;
pub mod error;
pub mod service;
pub mod types;

pub use client::ForecastClient;
pub use error::WeatherError;
pub use service::WeatherService;
pub use types::{records_from_response, ForecastResponse};
