//! Shared SQLite store for cached lookups.
//!
//! One database holds three tables, one per accessor. Lookups that miss
//! are fetched upstream and written back here in the background.

pub mod handle;
pub mod records;
pub mod store;

pub use handle::StoreHandle;
pub use records::{Coordinates, EventRecord, LocationRecord, WeatherRecord};
pub use store::Store;
