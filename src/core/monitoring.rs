//! Monitoring scope - decides which messages are scanned for quotes.
//!
//! Each guild has at most one [`MonitoringConfig`], naming either a single text channel or a
//! category whose text channels are all watched. The mode is carried explicitly instead of
//! being inferred from the target's name.

use serde::{Deserialize, Serialize};

/// How the monitoring target is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitoringMode {
    /// Only the configured text channel is watched
    Single,
    /// Every plain text channel inside the configured category is watched
    Category,
}

impl MonitoringMode {
    /// Wire name used by the backend (`"single"` / `"category"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Category => "category",
        }
    }

    /// Parses the wire name, case-insensitively.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single" => Some(Self::Single),
            "category" => Some(Self::Category),
            _ => None,
        }
    }
}

/// Per-guild quote monitoring configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoringConfig {
    /// Single channel or whole category
    pub mode: MonitoringMode,
    /// Channel ID (single mode) or category ID (category mode)
    pub target_id: String,
    /// Display name of the target at the time it was configured
    pub target_name: String,
}

/// Kind of channel a message was posted in, reduced to what the filter needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Plain guild text channel
    Text,
    /// Voice or stage channel (text-in-voice)
    Voice,
    /// Any thread
    Thread,
    /// Announcement, forum, DM and everything else
    Other,
}

/// Read-only view of an incoming chat message.
#[derive(Debug, Clone)]
pub struct RawMessage {
    /// Message body
    pub content: String,
    /// Channel the message was posted in
    pub channel_id: String,
    /// Kind of that channel
    pub channel_kind: ChannelKind,
    /// Parent category (or parent channel for threads), if any
    pub parent_id: Option<String>,
    /// Whether the author is a bot account
    pub author_is_bot: bool,
}

/// Returns `true` when `message` falls inside the guild's monitoring scope.
///
/// Bot-authored messages and guilds without a configuration are never monitored.
#[must_use]
pub fn should_monitor(message: &RawMessage, config: Option<&MonitoringConfig>) -> bool {
    let Some(config) = config else {
        return false;
    };
    if message.author_is_bot {
        return false;
    }

    match config.mode {
        MonitoringMode::Single => message.channel_id == config.target_id,
        MonitoringMode::Category => {
            message.channel_kind == ChannelKind::Text
                && message.parent_id.as_deref() == Some(config.target_id.as_str())
        }
    }
}
