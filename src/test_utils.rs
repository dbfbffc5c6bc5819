//! Shared test utilities.
//!
//! Fixture builders with sensible defaults, an in-memory database, and fake
//! collaborators for the capture pipeline.

use crate::{
    backend::models::{Game, Metacritic, OwnedBy, UserMapping},
    core::{
        capture::{MessageProvenance, MonitoringConfigSource, QuoteRecord, QuoteSink},
        monitoring::{ChannelKind, MonitoringConfig, MonitoringMode, RawMessage},
        users::VoiceMember,
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use sea_orm::DatabaseConnection;
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Single-channel configuration targeting `channel_id`.
pub fn single_config(channel_id: &str) -> MonitoringConfig {
    MonitoringConfig {
        mode: MonitoringMode::Single,
        target_id: channel_id.to_string(),
        target_name: "quotes".to_string(),
    }
}

/// Category configuration targeting `category_id`.
pub fn category_config(category_id: &str) -> MonitoringConfig {
    MonitoringConfig {
        mode: MonitoringMode::Category,
        target_id: category_id.to_string(),
        target_name: "Hangout".to_string(),
    }
}

/// Human-authored message in a plain text channel without a parent.
pub fn raw_message(channel_id: &str, content: &str) -> RawMessage {
    RawMessage {
        content: content.to_string(),
        channel_id: channel_id.to_string(),
        channel_kind: ChannelKind::Text,
        parent_id: None,
        author_is_bot: false,
    }
}

/// Provenance with fixed values: author "Tester" (42), channel "quotes", message 999.
#[allow(clippy::unwrap_used)]
pub fn test_provenance() -> MessageProvenance {
    MessageProvenance {
        author_name: "Tester".to_string(),
        author_id: "42".to_string(),
        channel_name: "quotes".to_string(),
        message_id: "999".to_string(),
        captured_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    }
}

/// Game with only an ID and name set.
pub fn game(appid: u64, name: &str) -> Game {
    Game {
        appid,
        name: name.to_string(),
        ..Default::default()
    }
}

/// Game with owners and an optional Metacritic score.
pub fn game_owned_by(appid: u64, name: &str, owners: &[&str], score: Option<u32>) -> Game {
    Game {
        owned_by: Some(OwnedBy {
            steam_id: owners.iter().map(|o| (*o).to_string()).collect(),
        }),
        metacritic: score.map(|score| Metacritic { score: Some(score) }),
        ..game(appid, name)
    }
}

/// User mapping fixture.
pub fn mapping(
    steam_id: &str,
    username: &str,
    nickname: Option<&str>,
    discord_id: Option<&str>,
) -> UserMapping {
    UserMapping {
        steam_id: steam_id.to_string(),
        username: username.to_string(),
        nickname: nickname.map(str::to_string),
        discord_id: discord_id.map(str::to_string),
    }
}

/// Voice member fixture.
pub fn voice_member(
    user_id: &str,
    display_name: &str,
    username: &str,
    global_name: Option<&str>,
) -> VoiceMember {
    VoiceMember {
        user_id: user_id.to_string(),
        display_name: display_name.to_string(),
        username: username.to_string(),
        global_name: global_name.map(str::to_string),
    }
}

/// Configuration source returning a fixed answer and counting lookups.
pub struct FakeConfigSource {
    config: Option<MonitoringConfig>,
    fail: bool,
    lookups: AtomicUsize,
}

impl FakeConfigSource {
    /// Always returns `config`.
    pub fn with(config: MonitoringConfig) -> Self {
        Self {
            config: Some(config),
            fail: false,
            lookups: AtomicUsize::new(0),
        }
    }

    /// Guild is not configured.
    pub fn empty() -> Self {
        Self {
            config: None,
            fail: false,
            lookups: AtomicUsize::new(0),
        }
    }

    /// Every lookup fails like an unreachable backend.
    pub fn failing() -> Self {
        Self {
            config: None,
            fail: true,
            lookups: AtomicUsize::new(0),
        }
    }

    /// Number of lookups performed.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MonitoringConfigSource for FakeConfigSource {
    async fn monitoring_config(&self, _guild_id: &str) -> Result<Option<MonitoringConfig>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Backend {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        Ok(self.config.clone())
    }
}

/// Sink that records every saved quote, or fails every save.
#[derive(Default)]
pub struct RecordingSink {
    saved: Mutex<Vec<QuoteRecord>>,
    fail: bool,
}

impl RecordingSink {
    /// Sink whose saves always fail.
    pub fn failing() -> Self {
        Self {
            saved: Mutex::default(),
            fail: true,
        }
    }

    /// Snapshot of saved records.
    #[allow(clippy::unwrap_used)]
    pub fn saved(&self) -> Vec<QuoteRecord> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteSink for RecordingSink {
    #[allow(clippy::unwrap_used)]
    async fn save_quote(&self, record: &QuoteRecord) -> Result<()> {
        if self.fail {
            return Err(Error::Backend {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        self.saved.lock().unwrap().push(record.clone());
        Ok(())
    }
}
