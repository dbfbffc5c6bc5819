//! Message handler - feeds guild messages into the quote capture pipeline.
//!
//! Converts Serenity types into the core's [`RawMessage`] and [`MessageProvenance`], runs
//! the pipeline, and reacts to the message when its quote was saved. Nothing here returns
//! an error: capture never interrupts the chat.

use crate::{
    bot::BotData,
    core::{
        capture::{MessageProvenance, capture_quote},
        monitoring::{ChannelKind, RawMessage},
    },
};
use poise::serenity_prelude as serenity;
use tracing::{debug, warn};

/// Reduces a Discord channel type to the kinds the monitoring filter distinguishes.
#[must_use]
pub fn channel_kind(kind: serenity::ChannelType) -> ChannelKind {
    match kind {
        serenity::ChannelType::Text => ChannelKind::Text,
        serenity::ChannelType::Voice | serenity::ChannelType::Stage => ChannelKind::Voice,
        serenity::ChannelType::PublicThread
        | serenity::ChannelType::PrivateThread
        | serenity::ChannelType::NewsThread => ChannelKind::Thread,
        _ => ChannelKind::Other,
    }
}

/// Handles one incoming message.
pub async fn on_message(ctx: &serenity::Context, msg: &serenity::Message, data: &BotData) {
    if msg.author.bot {
        return;
    }
    let Some(guild_id) = msg.guild_id else {
        return;
    };

    let channel = match msg.channel_id.to_channel(ctx).await {
        Ok(serenity::Channel::Guild(channel)) => channel,
        Ok(_) => return,
        Err(e) => {
            debug!("Could not resolve channel {}: {}", msg.channel_id, e);
            return;
        }
    };

    let raw = RawMessage {
        content: msg.content.clone(),
        channel_id: msg.channel_id.to_string(),
        channel_kind: channel_kind(channel.kind),
        parent_id: channel.parent_id.map(|id| id.to_string()),
        author_is_bot: msg.author.bot,
    };

    let author_name = msg
        .member
        .as_ref()
        .and_then(|member| member.nick.clone())
        .unwrap_or_else(|| msg.author.display_name().to_string());

    let provenance = MessageProvenance {
        author_name,
        author_id: msg.author.id.to_string(),
        channel_name: channel.name.clone(),
        message_id: msg.id.to_string(),
        captured_at: chrono::Utc::now(),
    };

    let backend = data.backend.as_ref();
    let outcome = capture_quote(&guild_id.to_string(), &raw, provenance, backend, backend).await;

    if outcome.is_saved() {
        let emoji = data.config.quotes.acknowledgement_emoji.clone();
        if let Err(e) = msg
            .react(ctx, serenity::ReactionType::Unicode(emoji))
            .await
        {
            warn!("Saved quote {} but could not react: {}", msg.id, e);
        }
    }
}
