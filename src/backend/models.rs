//! Wire types for the NerdHub backend.
//!
//! The backend speaks camelCase JSON and leaves many game fields null, so most
//! nested fields are optional here and the accessors below supply the fallbacks.

use crate::core::monitoring::{MonitoringConfig, MonitoringMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A game document from the library.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Steam app ID
    pub appid: u64,
    /// Store name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Short store description
    pub short_description: Option<String>,
    /// Header image URL
    pub header_image: Option<String>,
    /// Free-to-play flag
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_free: bool,
    /// Current store price
    pub price_overview: Option<PriceOverview>,
    /// Supported platforms
    #[serde(default, deserialize_with = "null_as_default")]
    pub platforms: Platforms,
    /// Store genres
    pub genres: Option<Vec<Description>>,
    /// Store categories (multiplayer, controller support, ...)
    pub categories: Option<Vec<Description>>,
    /// Release date
    pub release_date: Option<ReleaseDate>,
    /// Metacritic rating
    pub metacritic: Option<Metacritic>,
    /// Developers
    pub developers: Option<Vec<String>>,
    /// Publishers
    pub publishers: Option<Vec<String>>,
    /// Library owners
    pub owned_by: Option<OwnedBy>,
}

/// Price information.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceOverview {
    /// Formatted final price, e.g. `"$19.99"`
    pub final_formatted: Option<String>,
}

/// Platform support flags.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Platforms {
    /// Windows
    #[serde(default, deserialize_with = "null_as_default")]
    pub windows: bool,
    /// macOS
    #[serde(default, deserialize_with = "null_as_default")]
    pub mac: bool,
    /// Linux
    #[serde(default, deserialize_with = "null_as_default")]
    pub linux: bool,
}

/// A `{ "description": ... }` entry used for genres and categories.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Description {
    /// Display text
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// Release date as reported by the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseDate {
    /// Free-form date string
    pub date: Option<String>,
}

/// Metacritic rating.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Metacritic {
    /// Score out of 100
    pub score: Option<u32>,
}

/// Owners of a game.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedBy {
    /// Steam IDs of every owner
    #[serde(default, deserialize_with = "null_as_default")]
    pub steam_id: Vec<String>,
}

impl Game {
    /// Steam IDs of every owner, empty when unknown.
    #[must_use]
    pub fn owner_ids(&self) -> &[String] {
        self.owned_by
            .as_ref()
            .map(|owned| owned.steam_id.as_slice())
            .unwrap_or_default()
    }

    /// Whether `steam_id` owns this game.
    #[must_use]
    pub fn is_owned_by(&self, steam_id: &str) -> bool {
        self.owner_ids().iter().any(|owner| owner == steam_id)
    }

    /// Metacritic score, if rated.
    #[must_use]
    pub fn metacritic_score(&self) -> Option<u32> {
        self.metacritic.and_then(|m| m.score)
    }

    /// Formatted price, `"Free"` for free games, otherwise `"N/A"`.
    #[must_use]
    pub fn price_label(&self) -> String {
        self.price_overview
            .as_ref()
            .and_then(|p| p.final_formatted.clone())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| {
                let fallback = if self.is_free { "Free" } else { "N/A" };
                fallback.to_string()
            })
    }

    /// Steam store page URL.
    #[must_use]
    pub fn store_url(&self) -> String {
        format!("https://store.steampowered.com/app/{}", self.appid)
    }
}

/// Steam account name and optional real name, as returned by `get-usernames`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsernameInfo {
    /// Steam username
    pub username: Option<String>,
    /// Preferred display name
    pub nickname: Option<String>,
}

impl UsernameInfo {
    /// Nickname, falling back to username.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.nickname
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.username.as_deref().filter(|u| !u.is_empty()))
    }
}

/// Link between a Discord account and a Steam account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMapping {
    /// 17-digit Steam ID
    pub steam_id: String,
    /// Steam username
    pub username: String,
    /// Real name or preferred display name
    pub nickname: Option<String>,
    /// Discord user ID
    pub discord_id: Option<String>,
}

impl UserMapping {
    /// Nickname, falling back to username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.username)
    }
}

/// Quote monitoring record as stored by the backend.
///
/// Older records carry no `mode`; for those a `#` prefix on the name marks a single channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteCategory {
    /// Guild ID
    pub guild_id: String,
    /// Channel or category ID
    pub category_id: String,
    /// Channel or category name
    pub category_name: String,
    /// `"single"` or `"category"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Last update time, set by the backend
    #[serde(default, skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl QuoteCategory {
    /// Builds the record written by `/set-quote-channel`.
    #[must_use]
    pub fn from_config(guild_id: &str, config: &MonitoringConfig) -> Self {
        let category_name = match config.mode {
            MonitoringMode::Single => format!("#{}", config.target_name),
            MonitoringMode::Category => config.target_name.clone(),
        };
        Self {
            guild_id: guild_id.to_string(),
            category_id: config.target_id.clone(),
            category_name,
            mode: Some(config.mode.as_str().to_string()),
            updated_at: None,
        }
    }

    /// Resolves the monitoring mode, using the legacy name prefix when `mode` is absent.
    #[must_use]
    pub fn monitoring_mode(&self) -> MonitoringMode {
        self.mode
            .as_deref()
            .and_then(MonitoringMode::from_wire)
            .unwrap_or_else(|| {
                if self.category_name.starts_with('#') {
                    MonitoringMode::Single
                } else {
                    MonitoringMode::Category
                }
            })
    }

    /// Converts to the domain configuration.
    #[must_use]
    pub fn to_config(&self) -> MonitoringConfig {
        let mode = self.monitoring_mode();
        let target_name = match mode {
            MonitoringMode::Single => self
                .category_name
                .strip_prefix('#')
                .unwrap_or(&self.category_name)
                .to_string(),
            MonitoringMode::Category => self.category_name.clone(),
        };
        MonitoringConfig {
            mode,
            target_id: self.category_id.clone(),
            target_name,
        }
    }
}

/// The quote of the day.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyQuote {
    /// Quote body
    pub quote_text: String,
    /// Speakers
    #[serde(default, deserialize_with = "null_as_default")]
    pub quoted_persons: Vec<String>,
    /// Who captured it
    #[serde(default, deserialize_with = "null_as_default")]
    pub submitter: String,
    /// When it was captured
    pub timestamp: Option<DateTime<Utc>>,
}

/// Backend health report.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthReport {
    /// e.g. `"Healthy"`
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// Service name
    #[serde(default, deserialize_with = "null_as_default")]
    pub service: String,
    /// Deployed version
    pub version: Option<String>,
    /// Backend clock
    pub timestamp: Option<DateTime<Utc>>,
}
