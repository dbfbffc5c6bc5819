//! NerdHub backend access.
//!
//! The backend owns the game library, the Discord/Steam user links, captured quotes and
//! per-guild quote monitoring configuration. [`NerdHubClient`] wraps its REST API.

/// HTTP client
pub mod client;
/// JSON wire types
pub mod models;

pub use client::{HealthCheck, NerdHubClient};
