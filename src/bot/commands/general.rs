//! General Discord commands - ping and help.
//!
//! Simple commands that touch neither the backend nor the database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**NerdHub Bot Help**\n\
        Here is a summary of all available commands.\n\n\
        **Game Commands**\n\
        • `/getgame [appid] [name]` - Shows details for a game in the library.\n\
        • `/randomgame [genre] [platform]` - Picks a random game, optionally filtered.\n\
        • `/sharedgame [channel] [limit] [blacklist] [users]` - Finds games everyone owns.\n\n\
        **Quote Commands**\n\
        • `/quote-of-the-day` - Shows today's quote.\n\
        • `/set-quote-channel <channel>` - (Admin) Monitors a channel or category for quotes.\n\
        • `/quote-status` - (Admin) Shows the quote monitoring setup.\n\
        • `/addquote <quote>` - Adds a quote to the local collection.\n\
        • `/randomquote` - Shows a random quote from the local collection.\n\n\
        **Account Commands**\n\
        • `/link-steam <steamid> <username> [nickname]` - Links your Steam account.\n\n\
        **Utility Commands**\n\
        • `/connection-status` - Checks the NerdHub backend connection.\n\
        • `/dbstatus` - Shows the local database status.\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Quotes posted as `\"text\" - Person` in a monitored channel are saved automatically.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
