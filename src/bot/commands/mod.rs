//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

use crate::{bot::BotData, errors::Error};

/// Game library commands
pub mod games;

/// General utility commands
pub mod general;

/// Quote monitoring and quote retrieval commands
pub mod quotes;

/// Steam account linking
pub mod users;

/// Backend and database health commands
pub mod utility;

// Export commands
pub use games::*;
pub use general::*;
pub use quotes::*;
pub use users::*;
pub use utility::*;

/// Every command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        get_game(),
        random_game(),
        shared_game(),
        set_quote_channel(),
        quote_status(),
        quote_of_the_day(),
        add_quote(),
        random_quote(),
        link_steam(),
        connection_status(),
        dbstatus(),
        ping(),
        help(),
    ]
}
