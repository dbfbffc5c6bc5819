//! Game Discord commands - `getgame`, `randomgame` and `sharedgame`.
//!
//! These commands read the game library from the NerdHub backend, run the lookups in
//! `core::games` / `core::users`, and render the results as embeds.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        backend::models::{Game, UsernameInfo},
        bot::{BotData, COLOR_INFO, COLOR_SUCCESS, COLOR_WARNING, FOOTER, handlers::autocomplete},
        core::{
            games::{self, NameMatch},
            users::{self, ResolvedPlayers, VoiceMember},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use rand::seq::IndexedRandom;
    use std::collections::HashMap;
    use tracing::{error, warn};

    const DEFAULT_SHARED_LIMIT: usize = 10;
    const MAX_FIELD_LEN: usize = 1024;
    const MAX_SHORT_FIELD_LEN: usize = 50;

    /// Genre filter for `/randomgame`.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum GenreChoice {
        Action,
        Adventure,
        #[name = "RPG"]
        Rpg,
        Strategy,
    }

    impl GenreChoice {
        const fn query_value(self) -> &'static str {
            match self {
                Self::Action => "action",
                Self::Adventure => "adventure",
                Self::Rpg => "rpg",
                Self::Strategy => "strategy",
            }
        }
    }

    /// Platform filter for `/randomgame`.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum PlatformChoice {
        Windows,
        Mac,
        Linux,
    }

    impl PlatformChoice {
        const fn query_value(self) -> &'static str {
            match self {
                Self::Windows => "windows",
                Self::Mac => "mac",
                Self::Linux => "linux",
            }
        }
    }

    /// Fetches owner names, logging and continuing without them on failure.
    async fn owner_usernames(
        ctx: poise::Context<'_, BotData, Error>,
        game: &Game,
    ) -> HashMap<String, UsernameInfo> {
        match ctx.data().backend.usernames(game.owner_ids()).await {
            Ok(names) => names,
            Err(e) => {
                warn!("Failed to fetch usernames for {}: {}", game.appid, e);
                HashMap::new()
            }
        }
    }

    fn base_game_embed(game: &Game) -> serenity::CreateEmbed {
        let platforms = games::join_or(&games::platform_names(game.platforms), "Unknown");

        let mut embed = serenity::CreateEmbed::default()
            .title(format!("🎮 {}", game.name))
            .url(game.store_url())
            .description(
                game.short_description
                    .clone()
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| "No description available.".to_string()),
            )
            .color(COLOR_INFO)
            .footer(serenity::CreateEmbedFooter::new(FOOTER))
            .timestamp(serenity::Timestamp::now())
            .field("💰 Price", game.price_label(), true)
            .field("🔢 App ID", game.appid.to_string(), true)
            .field("🖥️ Platforms", platforms, true)
            .field("🎯 Genres", games::genre_list(game), true);

        if let Some(image) = game.header_image.as_deref().filter(|i| !i.is_empty()) {
            embed = embed.image(image);
        }
        embed
    }

    /// Full detail embed used by `/getgame`.
    fn detailed_game_embed(
        game: &Game,
        usernames: &HashMap<String, UsernameInfo>,
    ) -> serenity::CreateEmbed {
        let release = game
            .release_date
            .as_ref()
            .and_then(|r| r.date.clone())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());
        let metacritic = game
            .metacritic_score()
            .map_or_else(|| "N/A".to_string(), |score| format!("{score}/100"));
        let developers = games::join_or(game.developers.as_deref().unwrap_or_default(), "Unknown");
        let publishers = games::join_or(game.publishers.as_deref().unwrap_or_default(), "Unknown");
        let owners = games::join_or(
            &games::sorted_owner_names(game.owner_ids(), usernames),
            "Unknown",
        );

        base_game_embed(game)
            .field("📅 Release Date", release, true)
            .field("⭐ Metacritic", metacritic, true)
            .field(
                "🏗️ Developer",
                games::truncate(&developers, MAX_SHORT_FIELD_LEN),
                true,
            )
            .field(
                "📢 Publisher",
                games::truncate(&publishers, MAX_SHORT_FIELD_LEN),
                true,
            )
            .field(
                "📂 Categories",
                games::truncate(&games::category_list(game), MAX_SHORT_FIELD_LEN),
                true,
            )
            .field("👥 Owned By", games::truncate(&owners, MAX_FIELD_LEN), false)
    }

    /// Fetches a specific game from the library by App ID or name.
    ///
    /// A name matching several games lists the first ten candidates instead.
    #[poise::command(slash_command, rename = "getgame")]
    pub async fn get_game(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The App ID of the game to fetch"] appid: Option<u64>,
        #[description = "The name of the game to search for"]
        #[autocomplete = "autocomplete::autocomplete_game_name"]
        name: Option<String>,
    ) -> Result<()> {
        ctx.defer().await?;

        let name = name.filter(|n| !n.trim().is_empty());
        if appid.is_none() && name.is_none() {
            ctx.say("Please provide either an App ID or a game name to search for.")
                .await?;
            return Ok(());
        }

        let backend = &ctx.data().backend;
        let game = if let Some(appid) = appid {
            match backend.game_by_appid(appid).await {
                Ok(Some(game)) => game,
                Ok(None) => {
                    ctx.say(format!("No game found with App ID {appid}."))
                        .await?;
                    return Ok(());
                }
                Err(e) => {
                    error!("Failed to fetch game {}: {}", appid, e);
                    ctx.say("An error occurred while fetching the game.").await?;
                    return Ok(());
                }
            }
        } else {
            let query = name.unwrap_or_default();
            let library = match backend.all_games().await {
                Ok(library) => library,
                Err(e) => {
                    error!("Failed to fetch games: {}", e);
                    ctx.say("An error occurred while fetching the game.").await?;
                    return Ok(());
                }
            };
            match games::find_by_name(&library, &query) {
                NameMatch::Found(game) => game.clone(),
                NameMatch::None => {
                    ctx.say(format!("No games found matching \"{query}\"."))
                        .await?;
                    return Ok(());
                }
                NameMatch::Ambiguous(matches) => {
                    let list = games::format_match_lines(&matches).join("\n");
                    let embed = serenity::CreateEmbed::default()
                        .title(format!("🔍 Multiple games found for \"{query}\""))
                        .description(format!(
                            "Found {} games. Showing first {}:\n\n{list}",
                            matches.len(),
                            games::MAX_LISTED_MATCHES.min(matches.len())
                        ))
                        .color(COLOR_WARNING)
                        .footer(serenity::CreateEmbedFooter::new(
                            "Use /getgame with the specific App ID to get details for a specific game.",
                        ));
                    ctx.send(poise::CreateReply::default().embed(embed)).await?;
                    return Ok(());
                }
            }
        };

        let usernames = owner_usernames(ctx, &game).await;
        ctx.send(poise::CreateReply::default().embed(detailed_game_embed(&game, &usernames)))
            .await?;
        Ok(())
    }

    /// Fetches a random game from the library, optionally filtered.
    #[poise::command(slash_command, rename = "randomgame")]
    pub async fn random_game(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Filter by game genre"] genre: Option<GenreChoice>,
        #[description = "Filter by game platform"] platform: Option<PlatformChoice>,
    ) -> Result<()> {
        ctx.defer().await?;

        let fetched = ctx
            .data()
            .backend
            .filtered_games(
                genre.map(GenreChoice::query_value),
                platform.map(PlatformChoice::query_value),
            )
            .await;

        let library = match fetched {
            Ok(library) => library,
            Err(e) => {
                error!("Failed to fetch games: {}", e);
                ctx.say("An error occurred while fetching a random game.")
                    .await?;
                return Ok(());
            }
        };

        let Some(game) = library.choose(&mut rand::rng()).cloned() else {
            ctx.say("No games found with the specified filters.").await?;
            return Ok(());
        };

        let usernames = owner_usernames(ctx, &game).await;
        let owners: Vec<String> = game
            .owner_ids()
            .iter()
            .map(|id| format!("{id} - {}", games::owner_name(id, &usernames)))
            .collect();
        let owners = if owners.is_empty() {
            "Unknown".to_string()
        } else {
            games::truncate(&owners.join("\n"), MAX_FIELD_LEN)
        };

        let embed = base_game_embed(&game).field("👥 Owned By", owners, false);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Where the players for `/sharedgame` came from.
    enum PlayerSource {
        Manual,
        Voice(String),
    }

    /// Voice channel name and its non-bot members, read from the cache.
    fn voice_channel_members(
        ctx: poise::Context<'_, BotData, Error>,
        channel_id: serenity::ChannelId,
    ) -> Option<(String, Vec<VoiceMember>)> {
        let guild = ctx.guild()?;
        let channel = guild.channels.get(&channel_id)?;
        let members = guild
            .voice_states
            .values()
            .filter(|state| state.channel_id == Some(channel_id))
            .filter_map(|state| guild.members.get(&state.user_id))
            .filter(|member| !member.user.bot)
            .map(|member| VoiceMember {
                user_id: member.user.id.to_string(),
                display_name: member.display_name().to_string(),
                username: member.user.name.clone(),
                global_name: member.user.global_name.clone(),
            })
            .collect();
        Some((channel.name.clone(), members))
    }

    /// The invoking member's current voice channel, from the cache.
    fn author_voice_channel(
        ctx: poise::Context<'_, BotData, Error>,
    ) -> Option<serenity::ChannelId> {
        let guild = ctx.guild()?;
        guild
            .voice_states
            .get(&ctx.author().id)
            .and_then(|state| state.channel_id)
    }

    /// Finds games owned by everyone in a voice channel, or by a manual list of users.
    ///
    /// Voice mode maps members to Steam accounts via `/link-steam`; the blacklist removes
    /// members by partial name. Manual mode accepts Steam IDs, usernames or nicknames.
    #[allow(clippy::too_many_lines)] // Mirrors the command's four input modes
    #[poise::command(slash_command, guild_only, rename = "sharedgame")]
    pub async fn shared_game(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The voice channel to check (defaults to your current voice channel)"]
        #[channel_types("Voice", "Stage")]
        channel: Option<serenity::Channel>,
        #[description = "Maximum number of games to show (default: 10)"]
        #[min = 1]
        #[max = 25]
        limit: Option<u32>,
        #[description = "Comma-separated list of users to exclude from voice channel search"]
        blacklist: Option<String>,
        #[description = "Comma-separated list of users to check (by nickname, username, or Steam ID)"]
        users: Option<String>,
    ) -> Result<()> {
        ctx.defer().await?;

        let limit = limit.map_or(DEFAULT_SHARED_LIMIT, |l| l.clamp(1, 25) as usize);
        let blacklist = blacklist.filter(|b| !b.trim().is_empty());
        let user_list = users.filter(|u| !u.trim().is_empty());

        let mappings = match ctx.data().backend.user_mappings().await {
            Ok(mappings) => mappings,
            Err(e) => {
                error!("Failed to fetch user mappings: {}", e);
                ctx.say("An error occurred while finding shared games.")
                    .await?;
                return Ok(());
            }
        };

        let mut excluded: Vec<String> = Vec::new();
        let (players, source): (ResolvedPlayers, PlayerSource) = if let Some(user_list) = &user_list {
            let resolved = users::resolve_user_list(user_list, &mappings);
            if !resolved.not_found.is_empty() {
                ctx.send(
                    poise::CreateReply::default()
                        .content(format!(
                            "⚠️ **Warning:** Could not find Steam accounts for: {}. Make sure they've used `/link-steam` to register.",
                            resolved.not_found.join(", ")
                        ))
                        .ephemeral(true),
                )
                .await?;
            }
            (resolved, PlayerSource::Manual)
        } else {
            let channel_id = match &channel {
                Some(channel) => {
                    let is_voice = channel.clone().guild().is_some_and(|c| {
                        matches!(
                            c.kind,
                            serenity::ChannelType::Voice | serenity::ChannelType::Stage
                        )
                    });
                    if !is_voice {
                        ctx.say("The specified channel is not a voice channel.")
                            .await?;
                        return Ok(());
                    }
                    channel.id()
                }
                None => {
                    let Some(current) = author_voice_channel(ctx) else {
                        ctx.say("You are not in a voice channel and no channel was specified. You can also use the `users` parameter to manually specify users.")
                            .await?;
                        return Ok(());
                    };
                    current
                }
            };

            let Some((channel_name, mut members)) = voice_channel_members(ctx, channel_id) else {
                ctx.say("Could not read that voice channel. Please try again.")
                    .await?;
                return Ok(());
            };

            if let Some(blacklist) = &blacklist {
                let filtered = users::apply_blacklist(members, blacklist);
                members = filtered.kept;
                excluded = filtered.excluded;
            }

            let note = if blacklist.is_some() {
                " (after applying blacklist)"
            } else {
                ""
            };
            match members.len() {
                0 => {
                    ctx.say(format!("No users found in {channel_name}{note}."))
                        .await?;
                    return Ok(());
                }
                1 => {
                    ctx.say(format!(
                        "Only one user found in {channel_name}{note}. Need at least 2 users to find shared games."
                    ))
                    .await?;
                    return Ok(());
                }
                _ => {}
            }

            (
                users::resolve_members(&members, &mappings),
                PlayerSource::Voice(channel_name),
            )
        };

        let steam_ids = players.steam_ids();
        match steam_ids.len() {
            0 => {
                ctx.say("No Steam accounts found for the specified users.")
                    .await?;
                return Ok(());
            }
            1 => {
                ctx.say("Only one Steam account found for the specified users. Need at least 2 to find shared games.")
                    .await?;
                return Ok(());
            }
            _ => {}
        }

        let library = match ctx.data().backend.all_games().await {
            Ok(library) => library,
            Err(e) => {
                error!("Failed to fetch games from database: {}", e);
                ctx.say("An error occurred while finding shared games.")
                    .await?;
                return Ok(());
            }
        };

        let shared = games::shared_games(&library, &steam_ids);
        let player_list = players.display_names().join(", ");
        if shared.is_empty() {
            ctx.say(format!("No shared games found for: {player_list}"))
                .await?;
            return Ok(());
        }

        let shown: Vec<&Game> = shared.iter().take(limit).copied().collect();
        let mut description = format!(
            "Found {} games owned by all users!\n\n**Users:** {player_list}",
            shared.len()
        );
        if !excluded.is_empty() {
            description.push_str(&format!("\n**🚫 Blacklisted:** {}", excluded.join(", ")));
        }
        description.push_str("\n\n**Games:**\n");
        description.push_str(&games::format_shared_game_lines(&shown).join("\n"));

        let title_context = match source {
            PlayerSource::Manual => "Manual Selection".to_string(),
            PlayerSource::Voice(name) => name,
        };

        let mut embed = serenity::CreateEmbed::default()
            .title(format!("🎮 Shared Games: {title_context}"))
            .description(description)
            .color(COLOR_SUCCESS)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Showing {} of {} games • {FOOTER}",
                shown.len(),
                shared.len()
            )))
            .timestamp(serenity::Timestamp::now());

        if shared.len() > limit {
            embed = embed.field(
                "📝 Note",
                format!(
                    "Only showing first {limit} games. Use the `limit` parameter to see more (max 25)."
                ),
                false,
            );
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
