//! Autocomplete handlers for Discord slash command parameters.

use crate::{bot::BotData, errors::Error};

/// Discord's limit on autocomplete suggestions.
const MAX_SUGGESTIONS: usize = 25;

/// Suggests game names from the library that contain the user's partial input.
///
/// Backend failures produce no suggestions rather than an error.
pub async fn autocomplete_game_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(games) = ctx.data().backend.all_games().await else {
        return Vec::new();
    };

    let names = games.into_iter().map(|game| game.name).collect();
    matching_names(names, partial)
}

/// Filters `names` by case-insensitive substring, sorted, capped at 25.
#[must_use]
pub fn matching_names(names: Vec<String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();

    let mut matching: Vec<String> = names
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .collect();

    // Sort alphabetically for consistent UX
    matching.sort_by_key(|name| name.to_lowercase());
    matching.dedup();
    matching.truncate(MAX_SUGGESTIONS);
    matching
}
