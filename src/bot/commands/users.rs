//! User Discord commands - linking Discord accounts to Steam accounts.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        backend::models::UserMapping,
        bot::{BotData, COLOR_ERROR, COLOR_SUCCESS},
        core::users::{self, MAX_USERNAME_LEN, MIN_USERNAME_LEN},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::{error, info};

    async fn reply_embed(
        ctx: poise::Context<'_, BotData, Error>,
        embed: serenity::CreateEmbed,
    ) -> Result<()> {
        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        Ok(())
    }

    fn failure_embed(title: &str, description: impl Into<String>) -> serenity::CreateEmbed {
        serenity::CreateEmbed::default()
            .title(title)
            .description(description)
            .color(COLOR_ERROR)
    }

    /// Links your Discord account to your Steam ID.
    ///
    /// The link is what lets `/sharedgame` find your library from a voice channel.
    #[poise::command(slash_command, rename = "link-steam")]
    pub async fn link_steam(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your Steam ID (17-digit number)"] steamid: String,
        #[description = "Your Steam username"] username: String,
        #[description = "Your Actual Name"] nickname: Option<String>,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;

        let steamid = steamid.trim().to_string();
        let username = username.trim().to_string();

        if !users::is_valid_steam_id(&steamid) {
            return reply_embed(
                ctx,
                failure_embed(
                    "❌ Invalid Steam ID",
                    "Please provide a valid 17-digit Steam ID.\n\n**How to find your Steam ID:**\n1. Go to your Steam profile\n2. Right-click and select \"Copy Page URL\"\n3. Your Steam ID is the 17-digit number at the end of the URL",
                ),
            )
            .await;
        }

        if !users::is_valid_username(&username) {
            return reply_embed(
                ctx,
                failure_embed(
                    "❌ Invalid Username",
                    format!(
                        "Steam username must be between {MIN_USERNAME_LEN} and {MAX_USERNAME_LEN} characters long."
                    ),
                ),
            )
            .await;
        }

        let nickname = nickname
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| username.clone());
        let discord_id = ctx.author().id.to_string();

        let mapping = UserMapping {
            steam_id: steamid.clone(),
            username: username.clone(),
            nickname: Some(nickname.clone()),
            discord_id: Some(discord_id.clone()),
        };

        match ctx.data().backend.link_user(&mapping).await {
            Ok(()) => {
                info!("Linked discord user {} to steam id {}", discord_id, steamid);
                let embed = serenity::CreateEmbed::default()
                    .title("✅ Account Linked Successfully!")
                    .description(format!(
                        "Your Discord account has been linked to Steam ID: **{steamid}**"
                    ))
                    .field("👤 Steam Username", username, true)
                    .field("🏷️ Display Name", nickname, true)
                    .field("🆔 Discord ID", discord_id, true)
                    .color(COLOR_SUCCESS)
                    .footer(serenity::CreateEmbedFooter::new(
                        "You can now use commands like /sharedgame!",
                    ));
                reply_embed(ctx, embed).await
            }
            Err(Error::Backend { status, message }) => {
                error!("Failed to link Steam account ({}): {}", status, message);
                reply_embed(
                    ctx,
                    failure_embed(
                        "❌ Failed to Link Account",
                        format!(
                            "An error occurred while linking your accounts.\n\n**Error:** {message}"
                        ),
                    ),
                )
                .await
            }
            Err(e) => {
                error!("Error linking Steam account: {}", e);
                reply_embed(
                    ctx,
                    failure_embed(
                        "❌ Connection Error",
                        "Unable to connect to the NerdHub backend. Please try again later.",
                    ),
                )
                .await
            }
        }
    }
}

// Re-export all commands
pub use inner::*;
