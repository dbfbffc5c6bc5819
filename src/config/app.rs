//! Application settings.
//!
//! Settings come from an optional `config.toml` (path overridable with `NERDHUB_CONFIG`),
//! then `BACKEND_URL` and `DEV_GUILD_ID` from the environment override the file. The
//! Discord token is never stored here; it is read right before the client starts.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// NerdHub backend settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Discord-side settings
    #[serde(default)]
    pub discord: DiscordConfig,
    /// Quote capture settings
    #[serde(default)]
    pub quotes: QuoteCaptureConfig,
}

/// NerdHub backend settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL, e.g. `http://localhost:5000`
    #[serde(default)]
    pub base_url: String,
    /// Timeout for `/connection-status`, in seconds
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            health_timeout_secs: default_health_timeout_secs(),
        }
    }
}

const fn default_health_timeout_secs() -> u64 {
    5
}

/// Discord-side settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscordConfig {
    /// Register commands in this guild only (instant updates while developing)
    pub dev_guild_id: Option<u64>,
}

/// Quote capture settings.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteCaptureConfig {
    /// Reaction added to messages whose quote was saved
    #[serde(default = "default_acknowledgement_emoji")]
    pub acknowledgement_emoji: String,
}

impl Default for QuoteCaptureConfig {
    fn default() -> Self {
        Self {
            acknowledgement_emoji: default_acknowledgement_emoji(),
        }
    }
}

fn default_acknowledgement_emoji() -> String {
    "💬".to_string()
}

impl AppConfig {
    /// Applies `BACKEND_URL` / `DEV_GUILD_ID` style overrides.
    ///
    /// `lookup` abstracts the environment so tests do not have to mutate it.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("BACKEND_URL").filter(|url| !url.trim().is_empty()) {
            self.backend.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup("DEV_GUILD_ID").filter(|id| !id.trim().is_empty()) {
            let id = raw.trim().parse::<u64>().map_err(|e| Error::Config {
                message: format!("DEV_GUILD_ID must be a numeric guild ID: {e}"),
            })?;
            self.discord.dev_guild_id = Some(id);
        }
        Ok(())
    }

    /// Checks that the configuration is usable.
    ///
    /// # Errors
    /// Returns an error if the backend URL is missing or not an http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = self.backend.base_url.trim();
        if url.is_empty() {
            return Err(Error::Config {
                message: "Backend URL is not set (BACKEND_URL or [backend].base_url)".to_string(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config {
                message: format!("Backend URL must start with http:// or https://, got {url}"),
            });
        }
        if self.quotes.acknowledgement_emoji.trim().is_empty() {
            return Err(Error::Config {
                message: "acknowledgement_emoji cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Loads configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Loading configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads the full application configuration: file (if present), then environment overrides.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path =
        std::env::var("NERDHUB_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut config = if Path::new(&path).exists() {
        load_config(&path)?
    } else {
        info!("No config file at {}, using environment only", path);
        AppConfig::default()
    };

    config.apply_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}
