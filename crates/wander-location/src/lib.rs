//! Location accessor: forward geocoding behind a read-through cache.

pub mod client;
pub mod error;
pub mod service;
pub mod types;

pub use client::GeocodeClient;
pub use error::LocationError;
pub use service::LocationService;
pub use types::{location_from_response, GeocodeResponse};
