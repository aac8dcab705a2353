//! Events accessor: nearby event search behind a read-through cache.

pub mod client;
pub mod error;
pub mod service;
pub mod types;

pub use client::EventsClient;
pub use error::EventsError;
pub use service::EventsService;
pub use types::{records_from_response, EventsResponse, EVENT_FETCH_LIMIT};
