//! Quote capture pipeline.
//!
//! Ties the monitoring filter and the parser together: look up the guild's configuration,
//! check scope, parse, and hand the result to persistence. Capture is best-effort; every
//! failure ends as a [`CaptureOutcome`] instead of an error.

use crate::{
    core::{
        monitoring::{MonitoringConfig, RawMessage, should_monitor},
        quote_parser::{ParsedQuote, parse_quote},
    },
    errors::Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Source of per-guild monitoring configuration.
#[async_trait]
pub trait MonitoringConfigSource: Send + Sync {
    /// Returns the guild's configuration, or `None` if it has not been configured.
    async fn monitoring_config(&self, guild_id: &str) -> Result<Option<MonitoringConfig>>;
}

/// Destination for captured quotes.
#[async_trait]
pub trait QuoteSink: Send + Sync {
    /// Persists a captured quote.
    async fn save_quote(&self, record: &QuoteRecord) -> Result<()>;
}

/// Where a captured message came from.
#[derive(Debug, Clone)]
pub struct MessageProvenance {
    /// Author display name (server nickname if set)
    pub author_name: String,
    /// Author user ID
    pub author_id: String,
    /// Channel name
    pub channel_name: String,
    /// Message ID
    pub message_id: String,
    /// When the quote was captured
    pub captured_at: DateTime<Utc>,
}

/// A parsed quote plus provenance, in the shape the backend stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    /// Quote body
    pub quote_text: String,
    /// Speakers, de-duplicated
    pub quoted_persons: Vec<String>,
    /// Display name of whoever posted the quote
    pub submitter: String,
    /// User ID of whoever posted the quote
    pub submitter_id: String,
    /// Channel ID
    pub channel_id: String,
    /// Channel name
    pub channel_name: String,
    /// Source message ID
    pub message_id: String,
    /// Capture time
    pub timestamp: DateTime<Utc>,
}

impl QuoteRecord {
    /// Combines a parsed quote with the message it came from.
    #[must_use]
    pub fn new(quote: ParsedQuote, channel_id: &str, provenance: MessageProvenance) -> Self {
        Self {
            quote_text: quote.quote_text,
            quoted_persons: quote.quoted_persons,
            submitter: provenance.author_name,
            submitter_id: provenance.author_id,
            channel_id: channel_id.to_string(),
            channel_name: provenance.channel_name,
            message_id: provenance.message_id,
            timestamp: provenance.captured_at,
        }
    }
}

/// Result of running a message through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The guild has no configuration, or the lookup failed
    NotConfigured,
    /// The message is outside the monitoring scope
    OutOfScope,
    /// The message is not a quote
    NoQuote,
    /// The quote was persisted
    Saved(QuoteRecord),
    /// Persistence failed; already logged
    SaveFailed,
}

impl CaptureOutcome {
    /// Whether the source message should be acknowledged.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Runs one message through lookup, scope check, parse and persistence.
pub async fn capture_quote(
    guild_id: &str,
    message: &RawMessage,
    provenance: MessageProvenance,
    configs: &dyn MonitoringConfigSource,
    sink: &dyn QuoteSink,
) -> CaptureOutcome {
    // Skip the lookup entirely for bots; should_monitor would reject them anyway
    if message.author_is_bot {
        return CaptureOutcome::OutOfScope;
    }

    let config = match configs.monitoring_config(guild_id).await {
        Ok(Some(config)) => config,
        Ok(None) => return CaptureOutcome::NotConfigured,
        Err(e) => {
            debug!("Monitoring config lookup failed for guild {}: {}", guild_id, e);
            return CaptureOutcome::NotConfigured;
        }
    };

    if !should_monitor(message, Some(&config)) {
        return CaptureOutcome::OutOfScope;
    }

    let Some(parsed) = parse_quote(&message.content) else {
        return CaptureOutcome::NoQuote;
    };

    let record = QuoteRecord::new(parsed, &message.channel_id, provenance);
    match sink.save_quote(&record).await {
        Ok(()) => {
            info!(
                "Captured quote {} from {} in #{}",
                record.message_id, record.submitter, record.channel_name
            );
            CaptureOutcome::Saved(record)
        }
        Err(e) => {
            warn!("Failed to save quote {}: {}", record.message_id, e);
            CaptureOutcome::SaveFailed
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::monitoring::ChannelKind;
    use crate::test_utils::{
        FakeConfigSource, RecordingSink, category_config, raw_message, single_config,
        test_provenance,
    };

    #[tokio::test]
    async fn test_captures_single_attribution_in_monitored_channel() {
        let configs = FakeConfigSource::with(single_config("10"));
        let sink = RecordingSink::default();
        let msg = raw_message("10", "\"Rolling for initiative\" - Dana");

        let outcome = capture_quote("1", &msg, test_provenance(), &configs, &sink).await;

        assert!(outcome.is_saved());
        let saved = sink.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].quote_text, "Rolling for initiative");
        assert_eq!(saved[0].quoted_persons, vec!["Dana"]);
        assert_eq!(saved[0].channel_id, "10");
        assert_eq!(saved[0].submitter, "Tester");
        assert_eq!(saved[0].submitter_id, "42");
        assert_eq!(saved[0].message_id, "999");
    }

    #[tokio::test]
    async fn test_unconfigured_guild_is_skipped() {
        let configs = FakeConfigSource::empty();
        let sink = RecordingSink::default();
        let msg = raw_message("10", "\"hi\" - Dana");

        let outcome = capture_quote("1", &msg, test_provenance(), &configs, &sink).await;

        assert_eq!(outcome, CaptureOutcome::NotConfigured);
        assert!(sink.saved().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_failure_is_treated_as_unconfigured() {
        let configs = FakeConfigSource::failing();
        let sink = RecordingSink::default();
        let msg = raw_message("10", "\"hi\" - Dana");

        let outcome = capture_quote("1", &msg, test_provenance(), &configs, &sink).await;

        assert_eq!(outcome, CaptureOutcome::NotConfigured);
        assert!(sink.saved().is_empty());
    }

    #[tokio::test]
    async fn test_bot_messages_skip_lookup() {
        let configs = FakeConfigSource::with(single_config("10"));
        let sink = RecordingSink::default();
        let mut msg = raw_message("10", "\"hi\" - Dana");
        msg.author_is_bot = true;

        let outcome = capture_quote("1", &msg, test_provenance(), &configs, &sink).await;

        assert_eq!(outcome, CaptureOutcome::OutOfScope);
        assert_eq!(configs.lookups(), 0);
    }

    #[tokio::test]
    async fn test_other_channel_is_out_of_scope() {
        let configs = FakeConfigSource::with(single_config("10"));
        let sink = RecordingSink::default();
        let msg = raw_message("11", "\"hi\" - Dana");

        let outcome = capture_quote("1", &msg, test_provenance(), &configs, &sink).await;

        assert_eq!(outcome, CaptureOutcome::OutOfScope);
    }

    #[tokio::test]
    async fn test_category_mode_captures_child_text_channel() {
        let configs = FakeConfigSource::with(category_config("500"));
        let sink = RecordingSink::default();
        let mut msg = raw_message("11", "Ann: \"left\"\nBen: \"right\"\nAnn: \"left again\"");
        msg.parent_id = Some("500".to_string());

        let outcome = capture_quote("1", &msg, test_provenance(), &configs, &sink).await;

        assert!(outcome.is_saved());
        let saved = sink.saved();
        assert_eq!(
            saved[0].quote_text,
            "Ann: \"left\"\nBen: \"right\"\nAnn: \"left again\""
        );
        assert_eq!(saved[0].quoted_persons, vec!["Ann", "Ben"]);
    }

    #[tokio::test]
    async fn test_category_mode_ignores_threads() {
        let configs = FakeConfigSource::with(category_config("500"));
        let sink = RecordingSink::default();
        let mut msg = raw_message("11", "\"hi\" - Dana");
        msg.parent_id = Some("500".to_string());
        msg.channel_kind = ChannelKind::Thread;

        let outcome = capture_quote("1", &msg, test_provenance(), &configs, &sink).await;

        assert_eq!(outcome, CaptureOutcome::OutOfScope);
    }

    #[tokio::test]
    async fn test_plain_chat_is_not_saved() {
        let configs = FakeConfigSource::with(single_config("10"));
        let sink = RecordingSink::default();
        let msg = raw_message("10", "gg everyone");

        let outcome = capture_quote("1", &msg, test_provenance(), &configs, &sink).await;

        assert_eq!(outcome, CaptureOutcome::NoQuote);
        assert!(sink.saved().is_empty());
    }

    #[tokio::test]
    async fn test_save_failure_is_reported_not_raised() {
        let configs = FakeConfigSource::with(single_config("10"));
        let sink = RecordingSink::failing();
        let msg = raw_message("10", "\"hi\" - Dana");

        let outcome = capture_quote("1", &msg, test_provenance(), &configs, &sink).await;

        assert_eq!(outcome, CaptureOutcome::SaveFailed);
        assert!(!outcome.is_saved());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = QuoteRecord::new(
            ParsedQuote {
                quote_text: "hi".to_string(),
                quoted_persons: vec!["Dana".to_string()],
            },
            "10",
            test_provenance(),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["quoteText"], "hi");
        assert_eq!(json["quotedPersons"][0], "Dana");
        assert_eq!(json["submitterId"], "42");
        assert_eq!(json["channelName"], "quotes");
        assert_eq!(json["messageId"], "999");
        assert!(json["timestamp"].is_string());
    }
}
