//! Unified error type for the bot.
//!
//! Every fallible operation in the crate returns [`Result`]. Backend failures keep the
//! HTTP status so callers can tell "not found" apart from an outage.

use thiserror::Error;

/// All errors produced by the bot.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// The NerdHub backend answered with a non-success status
    #[error("Backend returned {status}: {message}")]
    Backend {
        /// HTTP status code
        status: u16,
        /// Response body or status text
        message: String,
    },

    /// User-supplied input failed validation
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Human-readable reason
        message: String,
    },

    /// Local database error
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Transport-level HTTP error (connect, timeout, decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// String formatting error
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Returns `true` when the backend reported 404 Not Found.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Backend { status: 404, .. })
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
