//! Quote Discord commands - monitoring setup, status, and quote retrieval.
//!
//! `/set-quote-channel` and `/quote-status` manage the guild's monitoring configuration on
//! the backend. `/quote-of-the-day` reads captured quotes back; `/addquote` and
//! `/randomquote` work against the local store.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        backend::models::QuoteCategory,
        bot::{BotData, COLOR_ERROR, COLOR_INFO, COLOR_SUCCESS, COLOR_WARNING},
        core::{
            local_quotes,
            monitoring::{MonitoringConfig, MonitoringMode},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::{error, info};

    const COLOR_GOLD: u32 = 0xFFD7_00;

    /// Names of the plain text channels under `category_id`, ordered as in the sidebar.
    ///
    /// `None` when the category is not in the guild cache.
    fn category_text_channels(
        ctx: poise::Context<'_, BotData, Error>,
        category_id: serenity::ChannelId,
    ) -> Option<Vec<String>> {
        let guild = ctx.guild()?;
        let category = guild.channels.get(&category_id)?;
        if category.kind != serenity::ChannelType::Category {
            return None;
        }

        let mut children: Vec<&serenity::GuildChannel> = guild
            .channels
            .values()
            .filter(|c| c.parent_id == Some(category_id))
            .filter(|c| c.kind == serenity::ChannelType::Text)
            .collect();
        children.sort_by_key(|c| (c.position, c.id));
        Some(children.iter().map(|c| c.name.clone()).collect())
    }

    /// Whether a channel with `id` is still in the guild cache.
    fn channel_exists(ctx: poise::Context<'_, BotData, Error>, id: serenity::ChannelId) -> bool {
        ctx.guild()
            .is_some_and(|guild| guild.channels.contains_key(&id))
    }

    fn monitored_channel_list(names: &[String]) -> String {
        if names.is_empty() {
            return "\n\n*No text channels found in this category.*".to_string();
        }
        let lines: Vec<String> = names.iter().map(|name| format!("• #{name}")).collect();
        format!("\n\n**Monitoring channels:**\n{}", lines.join("\n"))
    }

    fn error_embed(description: &str) -> serenity::CreateEmbed {
        serenity::CreateEmbed::default()
            .title("❌ Error")
            .description(description)
            .color(COLOR_ERROR)
    }

    /// Sets a single text channel or a whole category to monitor for quotes.
    #[poise::command(
        slash_command,
        guild_only,
        rename = "set-quote-channel",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn set_quote_channel(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Text channel or category to monitor for quotes"]
        #[channel_types("Text", "Category")]
        channel: serenity::Channel,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;

        let Some(guild_id) = ctx.guild_id() else {
            ctx.say("This command can only be used in a server.").await?;
            return Ok(());
        };

        let Some(target) = channel.guild() else {
            ctx.say("Please select either a text channel or a category.")
                .await?;
            return Ok(());
        };

        let mode = match target.kind {
            serenity::ChannelType::Text => MonitoringMode::Single,
            serenity::ChannelType::Category => MonitoringMode::Category,
            _ => {
                ctx.say("Please select either a text channel or a category.")
                    .await?;
                return Ok(());
            }
        };

        let config = MonitoringConfig {
            mode,
            target_id: target.id.to_string(),
            target_name: target.name.clone(),
        };
        let record = QuoteCategory::from_config(&guild_id.to_string(), &config);

        if let Err(e) = ctx.data().backend.set_quote_category(&record).await {
            error!("Error setting quote channel/category: {}", e);
            ctx.send(
                poise::CreateReply::default()
                    .embed(error_embed("Failed to set quote monitoring. Please try again.")),
            )
            .await?;
            return Ok(());
        }

        info!(
            "Guild {} now monitors {} {} ({})",
            guild_id,
            mode.as_str(),
            target.name,
            target.id
        );

        let embed = match mode {
            MonitoringMode::Single => serenity::CreateEmbed::default()
                .title("✅ Quote Channel Set")
                .description(format!("Quote monitoring is now active in <#{}>", target.id)),
            MonitoringMode::Category => {
                let children = category_text_channels(ctx, target.id).unwrap_or_default();
                serenity::CreateEmbed::default()
                    .title("✅ Quote Category Set")
                    .description(format!(
                        "Quote monitoring is now active in all text channels within **{}**{}",
                        target.name,
                        monitored_channel_list(&children)
                    ))
            }
        }
        .color(COLOR_SUCCESS);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Checks the current quote monitoring configuration.
    #[poise::command(
        slash_command,
        guild_only,
        rename = "quote-status",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn quote_status(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer_ephemeral().await?;

        let Some(guild_id) = ctx.guild_id() else {
            ctx.say("This command can only be used in a server.").await?;
            return Ok(());
        };

        let record = match ctx.data().backend.quote_category(&guild_id.to_string()).await {
            Ok(record) => record,
            Err(e) => {
                error!("Error checking quote status: {}", e);
                ctx.send(poise::CreateReply::default().embed(error_embed(
                    "Failed to check quote monitoring status. Please try again.",
                )))
                .await?;
                return Ok(());
            }
        };

        let Some(record) = record else {
            let embed = serenity::CreateEmbed::default()
                .title("📊 Quote Monitoring Status")
                .description(
                    "❌ **No Configuration Found**\n\nQuote monitoring is not currently set up. Use `/set-quote-channel` to configure it.",
                )
                .color(COLOR_WARNING);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
            return Ok(());
        };

        let config = record.to_config();
        let target_id = config
            .target_id
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
            .map(serenity::ChannelId::new);

        let description = match config.mode {
            MonitoringMode::Category => {
                match target_id.and_then(|id| category_text_channels(ctx, id)) {
                    Some(children) => format!(
                        "📁 **Category Mode**\nMonitoring all text channels in **{}**{}",
                        config.target_name,
                        monitored_channel_list(&children)
                    ),
                    None => format!(
                        "❌ **Category Not Found**\nThe configured category (ID: {}) no longer exists.",
                        config.target_id
                    ),
                }
            }
            MonitoringMode::Single => match target_id.filter(|id| channel_exists(ctx, *id)) {
                Some(id) => format!("📝 **Single Channel Mode**\nMonitoring quotes in <#{id}>"),
                None => format!(
                    "❌ **Channel Not Found**\nThe configured channel (ID: {}) no longer exists.",
                    config.target_id
                ),
            },
        };

        let mut embed = serenity::CreateEmbed::default()
            .title("📊 Quote Monitoring Status")
            .description(description)
            .color(COLOR_INFO);
        if let Some(updated_at) = record.updated_at {
            embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
                "Last updated: {}",
                updated_at.format("%Y-%m-%d %H:%M UTC")
            )));
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Gets the quote of the day.
    #[poise::command(slash_command, rename = "quote-of-the-day")]
    pub async fn quote_of_the_day(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;

        let quote = match ctx.data().backend.daily_quote().await {
            Ok(Some(quote)) => quote,
            Ok(None) => {
                ctx.say("No quotes found in the database.").await?;
                return Ok(());
            }
            Err(e) => {
                error!("Error fetching quote of the day: {}", e);
                ctx.say("An error occurred while fetching the quote of the day.")
                    .await?;
                return Ok(());
            }
        };

        let persons = if quote.quoted_persons.is_empty() {
            "Unknown".to_string()
        } else {
            quote.quoted_persons.join(", ")
        };
        let submitter = if quote.submitter.is_empty() {
            "Unknown".to_string()
        } else {
            quote.submitter.clone()
        };
        let date = quote
            .timestamp
            .map_or_else(|| "Unknown".to_string(), |t| t.format("%Y-%m-%d").to_string());

        let embed = serenity::CreateEmbed::default()
            .title("📅 Quote of the Day")
            .description(format!("\"{}\"", quote.quote_text))
            .field("🗣️ Quoted Person(s)", persons, true)
            .field("📝 Submitted by", submitter, true)
            .field("📅 Date", date, true)
            .color(COLOR_GOLD)
            .footer(serenity::CreateEmbedFooter::new(
                "NerdHub Quotes • Same quote all day!",
            ))
            .timestamp(serenity::Timestamp::now());

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Adds a new quote to the local collection.
    #[poise::command(slash_command, prefix_command, rename = "addquote")]
    pub async fn add_quote(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The quote to add"] quote: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        match local_quotes::add_quote(db, &quote, ctx.author().id.to_string()).await {
            Ok(stored) => {
                info!("Quote {} added by {}", stored.id, ctx.author().name);
                ctx.say("Quote added successfully!").await?;
            }
            Err(Error::InvalidInput { message }) => {
                ctx.say(format!("❌ {message}")).await?;
            }
            Err(e) => {
                error!("Failed to add quote: {}", e);
                ctx.say("There was an error adding the quote.").await?;
            }
        }
        Ok(())
    }

    /// Shows a random quote from the local collection.
    #[poise::command(slash_command, prefix_command, rename = "randomquote")]
    pub async fn random_quote(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;

        let Some(quote) = local_quotes::random_quote(db).await? else {
            ctx.say("No quotes yet. Add one with `/addquote`!").await?;
            return Ok(());
        };

        let embed = serenity::CreateEmbed::default()
            .title("💬 Random Quote")
            .description(format!("\"{}\"", quote.text))
            .field("📝 Added by", format!("<@{}>", quote.added_by), true)
            .field(
                "📅 Date",
                quote.created_at.format("%Y-%m-%d").to_string(),
                true,
            )
            .color(COLOR_GOLD);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
