//! HTTP surface for the cached accessors.
//!
//! Three GET endpoints, one per accessor, each taking a single `data`
//! query parameter. Any failure collapses into one generic 500 response
//! so upstream details never leak to clients.

pub mod routes;

pub use routes::{routes, serve, ApiContext};
