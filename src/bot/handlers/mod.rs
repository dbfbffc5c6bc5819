//! Discord interaction handlers
//!
//! Handlers for gateway events and non-command interactions: the quote-capturing
//! message listener and autocomplete.

/// Autocomplete handlers for game names
pub mod autocomplete;
/// Message listener feeding the quote capture pipeline
pub mod message;
