//! HTTP client for the NerdHub backend.

use crate::{
    backend::models::{
        DailyQuote, Game, HealthReport, QuoteCategory, UserMapping, UsernameInfo,
    },
    core::{
        capture::{MonitoringConfigSource, QuoteRecord, QuoteSink},
        monitoring::MonitoringConfig,
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use std::{collections::HashMap, time::Duration};
use tracing::debug;

/// Health check result with round-trip time.
#[derive(Debug, Clone)]
pub struct HealthCheck {
    /// HTTP status returned
    pub status_code: u16,
    /// Round-trip time
    pub elapsed: Duration,
    /// Parsed body
    pub report: HealthReport,
}

/// Typed access to every NerdHub endpoint the bot uses.
#[derive(Debug, Clone)]
pub struct NerdHubClient {
    http: reqwest::Client,
    base_url: String,
}

impl NerdHubClient {
    /// Creates a client for `base_url` (e.g. `http://localhost:5000`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string()
        } else {
            body
        };
        Err(Error::Backend {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.http.get(&url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self.get_json(path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// `GET /api/Games/{appid}`; `None` when the backend has no such game.
    pub async fn game_by_appid(&self, appid: u64) -> Result<Option<Game>> {
        self.get_optional(&format!("Games/{appid}")).await
    }

    /// `GET /api/Games` - the whole library.
    pub async fn all_games(&self) -> Result<Vec<Game>> {
        self.get_json("Games").await
    }

    /// `GET /api/games` filtered by genre and platform.
    pub async fn filtered_games(
        &self,
        genre: Option<&str>,
        platform: Option<&str>,
    ) -> Result<Vec<Game>> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(genre) = genre {
            query.push(("genre", genre));
        }
        if let Some(platform) = platform {
            query.push(("platform", platform));
        }

        let url = self.url("games");
        debug!("GET {} {:?}", url, query);
        let response = self.http.get(&url).query(&query).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /api/Games/get-usernames` - names for a set of Steam IDs.
    pub async fn usernames(&self, steam_ids: &[String]) -> Result<HashMap<String, UsernameInfo>> {
        if steam_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let url = self.url("Games/get-usernames");
        debug!("POST {} ({} ids)", url, steam_ids.len());
        let response = self.http.post(&url).json(steam_ids).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `GET /api/Games/get-all-usernames` - every Discord/Steam link.
    pub async fn user_mappings(&self) -> Result<Vec<UserMapping>> {
        self.get_json("Games/get-all-usernames").await
    }

    /// `POST /api/Games/add-or-update-user-mapping`.
    pub async fn link_user(&self, mapping: &UserMapping) -> Result<()> {
        let url = self.url("Games/add-or-update-user-mapping");
        debug!("POST {} for discord user {:?}", url, mapping.discord_id);
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(mapping)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// `GET /api/Quotes/daily`; `None` when no quotes exist yet.
    pub async fn daily_quote(&self) -> Result<Option<DailyQuote>> {
        self.get_optional("Quotes/daily").await
    }

    /// `POST /api/Quotes`.
    pub async fn post_quote(&self, record: &QuoteRecord) -> Result<()> {
        let url = self.url("Quotes");
        debug!("POST {} for message {}", url, record.message_id);
        let response = self.http.post(&url).json(record).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// `GET /api/QuoteCategories/guild/{guild_id}`; `None` for unconfigured guilds.
    pub async fn quote_category(&self, guild_id: &str) -> Result<Option<QuoteCategory>> {
        self.get_optional(&format!("QuoteCategories/guild/{guild_id}"))
            .await
    }

    /// `POST /api/QuoteCategories` - creates or replaces the guild's configuration.
    pub async fn set_quote_category(&self, category: &QuoteCategory) -> Result<()> {
        let url = self.url("QuoteCategories");
        debug!("POST {} for guild {}", url, category.guild_id);
        let response = self.http.post(&url).json(category).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// `GET /api/Version/health` with a per-request timeout.
    pub async fn health(&self, timeout: Duration) -> Result<HealthCheck> {
        let url = self.url("Version/health");
        let started = std::time::Instant::now();
        let response = self.http.get(&url).timeout(timeout).send().await?;
        let elapsed = started.elapsed();
        let status_code = response.status().as_u16();
        let report = Self::check(response).await?.json().await?;
        Ok(HealthCheck {
            status_code,
            elapsed,
            report,
        })
    }
}

#[async_trait]
impl MonitoringConfigSource for NerdHubClient {
    async fn monitoring_config(&self, guild_id: &str) -> Result<Option<MonitoringConfig>> {
        Ok(self
            .quote_category(guild_id)
            .await?
            .map(|category| category.to_config()))
    }
}

#[async_trait]
impl QuoteSink for NerdHubClient {
    async fn save_quote(&self, record: &QuoteRecord) -> Result<()> {
        self.post_quote(record).await
    }
}

/// Maps a backend status to a short label for user-facing messages.
#[must_use]
pub fn describe_status(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map_or_else(|| status.to_string(), |reason| format!("{status} {reason}"))
}
