//! Removes every slash command registered in one guild.
//!
//! Usage: `clear-commands <client_id> <guild_id>`, with `DISCORD_BOT_TOKEN` set in the
//! environment or `.env`.

use dotenvy::dotenv;
use nerdhub_bot::errors::{Error, Result};
use poise::serenity_prelude as serenity;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn parse_id(value: Option<String>, name: &str) -> Result<u64> {
    let value = value.ok_or_else(|| Error::InvalidInput {
        message: format!("missing {name}; usage: clear-commands <client_id> <guild_id>"),
    })?;
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| Error::InvalidInput {
            message: format!("{name} must be a non-zero numeric ID, got {value}"),
        })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    dotenv().ok();

    let mut args = env::args().skip(1);
    let client_id = parse_id(args.next(), "client_id")?;
    let guild_id = serenity::GuildId::new(parse_id(args.next(), "guild_id")?);

    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    let http = serenity::Http::new(&token);
    http.set_application_id(serenity::ApplicationId::new(client_id));

    info!("Started deleting application (/) commands in guild {}.", guild_id);
    guild_id
        .set_commands(&http, Vec::new())
        .await
        .inspect_err(|e| error!("Failed to delete commands: {}", e))?;
    info!("Successfully deleted all application (/) commands.");

    Ok(())
}
