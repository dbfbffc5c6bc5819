//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the NerdHub bot: slash commands,
//! the quote-capturing message handler, autocomplete, and framework setup.

/// Discord command implementations (games, quotes, users, utility, general)
pub mod commands;
/// Poise framework setup, error hook and event dispatch
pub mod framework;
/// Discord interaction and event handlers (messages, autocomplete)
pub mod handlers;

use crate::{backend::NerdHubClient, config::app::AppConfig};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Embed colour for informational replies.
pub const COLOR_INFO: u32 = 0x0099_FF;
/// Embed colour for success confirmations.
pub const COLOR_SUCCESS: u32 = 0x00FF_00;
/// Embed colour for warnings.
pub const COLOR_WARNING: u32 = 0xFF99_00;
/// Embed colour for errors.
pub const COLOR_ERROR: u32 = 0xFF00_00;
/// Standard embed footer.
pub const FOOTER: &str = "Powered by NerdHub";

/// Shared data available to all bot commands and event handlers.
///
/// Everything here is immutable after startup; handlers share no mutable state.
pub struct BotData {
    /// Local database connection (manually added quotes)
    pub database: DatabaseConnection,
    /// NerdHub backend client
    pub backend: Arc<NerdHubClient>,
    /// Application settings
    pub config: Arc<AppConfig>,
}

impl BotData {
    /// Creates a new `BotData` from its parts.
    #[must_use]
    pub const fn new(
        database: DatabaseConnection,
        backend: Arc<NerdHubClient>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            database,
            backend,
            config,
        }
    }
}

pub use commands::*;
pub use handlers::*;
