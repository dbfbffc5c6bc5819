//! Core logic - framework-agnostic quote capture, game and user operations.
//!
//! Nothing in here touches Discord types; the bot layer converts into these.

/// Quote capture pipeline and its collaborator traits
pub mod capture;
/// Game library lookups and display helpers
pub mod games;
/// Locally stored quotes
pub mod local_quotes;
/// Monitoring scope filter
pub mod monitoring;
/// Quote citation parser
pub mod quote_parser;
/// Discord to Steam user resolution
pub mod users;
