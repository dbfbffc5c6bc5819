//! Game library logic - name lookup, shared games and display helpers.
//!
//! Operates on game lists already fetched from the backend; nothing here does I/O.

use crate::backend::models::{Game, Platforms, UsernameInfo};
use std::{cmp::Ordering, collections::HashMap};

/// Maximum number of candidates listed when a name matches several games.
pub const MAX_LISTED_MATCHES: usize = 10;

/// Outcome of looking a game up by name.
#[derive(Debug)]
pub enum NameMatch<'a> {
    /// Nothing matched
    None,
    /// A case-insensitive exact match, or the only partial match
    Found(&'a Game),
    /// Several partial matches and no exact one
    Ambiguous(Vec<&'a Game>),
}

/// Finds a game by name: exact (case-insensitive) match first, then substring matches.
#[must_use]
pub fn find_by_name<'a>(games: &'a [Game], query: &str) -> NameMatch<'a> {
    let needle = query.trim().to_lowercase();

    if let Some(exact) = games.iter().find(|g| g.name.to_lowercase() == needle) {
        return NameMatch::Found(exact);
    }

    let mut partial: Vec<&Game> = games
        .iter()
        .filter(|g| g.name.to_lowercase().contains(&needle))
        .collect();

    match partial.len() {
        0 => NameMatch::None,
        1 => NameMatch::Found(partial.remove(0)),
        _ => NameMatch::Ambiguous(partial),
    }
}

/// Games owned by every one of `steam_ids`, best rated first, then by name.
#[must_use]
pub fn shared_games<'a>(games: &'a [Game], steam_ids: &[String]) -> Vec<&'a Game> {
    let mut shared: Vec<&Game> = games
        .iter()
        .filter(|game| steam_ids.iter().all(|id| game.is_owned_by(id)))
        .collect();
    shared.sort_by(|a, b| compare_by_rating_then_name(a, b));
    shared
}

fn compare_by_rating_then_name(a: &Game, b: &Game) -> Ordering {
    let score_a = a.metacritic_score().unwrap_or(0);
    let score_b = b.metacritic_score().unwrap_or(0);
    score_b
        .cmp(&score_a)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

/// Names of supported platforms in store order.
#[must_use]
pub fn platform_names(platforms: Platforms) -> Vec<&'static str> {
    [
        (platforms.windows, "Windows"),
        (platforms.mac, "Mac"),
        (platforms.linux, "Linux"),
    ]
    .into_iter()
    .filter_map(|(supported, name)| supported.then_some(name))
    .collect()
}

/// Joins `items` with `", "`, or returns `fallback` when empty.
#[must_use]
pub fn join_or<S: AsRef<str>>(items: &[S], fallback: &str) -> String {
    if items.is_empty() {
        return fallback.to_string();
    }
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Genre descriptions joined, or `"Unknown"`.
#[must_use]
pub fn genre_list(game: &Game) -> String {
    let genres: Vec<&str> = game
        .genres
        .iter()
        .flatten()
        .map(|g| g.description.as_str())
        .collect();
    join_or(&genres, "Unknown")
}

/// First five category descriptions joined, or `"None"`.
#[must_use]
pub fn category_list(game: &Game) -> String {
    let categories: Vec<&str> = game
        .categories
        .iter()
        .flatten()
        .take(5)
        .map(|c| c.description.as_str())
        .collect();
    join_or(&categories, "None")
}

/// Cuts `text` to at most `max` characters, ending with `...` when shortened.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Display name for one owner, `"Unknown User"` if the backend has none.
#[must_use]
pub fn owner_name<'a>(steam_id: &str, usernames: &'a HashMap<String, UsernameInfo>) -> &'a str {
    usernames
        .get(steam_id)
        .and_then(UsernameInfo::display_name)
        .unwrap_or("Unknown User")
}

/// Owner display names, sorted case-insensitively.
#[must_use]
pub fn sorted_owner_names(
    steam_ids: &[String],
    usernames: &HashMap<String, UsernameInfo>,
) -> Vec<String> {
    let mut names: Vec<String> = steam_ids
        .iter()
        .map(|id| owner_name(id, usernames).to_string())
        .collect();
    names.sort_by_key(|name| name.to_lowercase());
    names
}

/// One list entry per game: `N. **name** (score/100) - price`.
#[must_use]
pub fn format_shared_game_lines(games: &[&Game]) -> Vec<String> {
    games
        .iter()
        .enumerate()
        .map(|(index, game)| {
            let rating = game
                .metacritic_score()
                .map(|score| format!(" ({score}/100)"))
                .unwrap_or_default();
            format!(
                "{}. **{}**{} - {}",
                index + 1,
                game.name,
                rating,
                game.price_label()
            )
        })
        .collect()
}

/// One list entry per candidate: `N. **name** (ID: appid)`, capped at [`MAX_LISTED_MATCHES`].
#[must_use]
pub fn format_match_lines(games: &[&Game]) -> Vec<String> {
    games
        .iter()
        .take(MAX_LISTED_MATCHES)
        .enumerate()
        .map(|(index, game)| format!("{}. **{}** (ID: {})", index + 1, game.name, game.appid))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{game, game_owned_by};

    #[test]
    fn test_exact_match_beats_partial() {
        let games = vec![game(1, "Portal 2"), game(2, "Portal"), game(3, "Portal Stories")];
        match find_by_name(&games, "portal") {
            NameMatch::Found(found) => assert_eq!(found.appid, 2),
            other => panic!("expected exact match, got {other:?}"),
        }
    }

    #[test]
    fn test_single_partial_match() {
        let games = vec![game(1, "Deep Rock Galactic"), game(2, "Stardew Valley")];
        match find_by_name(&games, "ROCK") {
            NameMatch::Found(found) => assert_eq!(found.appid, 1),
            other => panic!("expected single match, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_partial_matches() {
        let games = vec![
            game(1, "Half-Life"),
            game(2, "Half-Life 2"),
            game(3, "Team Fortress 2"),
        ];
        match find_by_name(&games, "half") {
            NameMatch::Ambiguous(found) => {
                let ids: Vec<u64> = found.iter().map(|g| g.appid).collect();
                assert_eq!(ids, vec![1, 2]);
            }
            other => panic!("expected ambiguous match, got {other:?}"),
        }
    }

    #[test]
    fn test_no_match() {
        let games = vec![game(1, "Terraria")];
        assert!(matches!(find_by_name(&games, "minecraft"), NameMatch::None));
    }

    #[test]
    fn test_shared_games_requires_every_owner() {
        let games = vec![
            game_owned_by(1, "Both", &["a", "b"], None),
            game_owned_by(2, "Only A", &["a"], None),
            game_owned_by(3, "All Three", &["a", "b", "c"], None),
        ];
        let ids = vec!["a".to_string(), "b".to_string()];
        let shared: Vec<u64> = shared_games(&games, &ids).iter().map(|g| g.appid).collect();
        assert_eq!(shared, vec![3, 1]);
    }

    #[test]
    fn test_shared_games_sorted_by_score_then_name() {
        let games = vec![
            game_owned_by(1, "zeta", &["a"], Some(80)),
            game_owned_by(2, "Alpha", &["a"], None),
            game_owned_by(3, "beta", &["a"], Some(90)),
            game_owned_by(4, "Gamma", &["a"], Some(80)),
        ];
        let ids = vec!["a".to_string()];
        let names: Vec<&str> = shared_games(&games, &ids)
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(names, vec!["beta", "Gamma", "zeta", "Alpha"]);
    }

    #[test]
    fn test_platform_names() {
        let platforms = Platforms {
            windows: true,
            mac: false,
            linux: true,
        };
        assert_eq!(platform_names(platforms), vec!["Windows", "Linux"]);
        assert!(platform_names(Platforms::default()).is_empty());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 50), "short");
        let long = "x".repeat(60);
        let cut = truncate(&long, 50);
        assert_eq!(cut.chars().count(), 50);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_owner_names_fall_back_and_sort() {
        let mut usernames = HashMap::new();
        usernames.insert(
            "1".to_string(),
            UsernameInfo {
                username: Some("zed".to_string()),
                nickname: None,
            },
        );
        usernames.insert(
            "2".to_string(),
            UsernameInfo {
                username: Some("anon".to_string()),
                nickname: Some("Bea".to_string()),
            },
        );
        let ids = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        assert_eq!(
            sorted_owner_names(&ids, &usernames),
            vec!["Bea", "Unknown User", "zed"]
        );
    }

    #[test]
    fn test_shared_game_lines() {
        let rated = game_owned_by(1, "Portal 2", &[], Some(95));
        let unrated = game_owned_by(2, "Dota 2", &[], None);
        let lines = format_shared_game_lines(&[&rated, &unrated]);
        assert_eq!(lines[0], "1. **Portal 2** (95/100) - N/A");
        assert_eq!(lines[1], "2. **Dota 2** - N/A");
    }

    #[test]
    fn test_match_lines_capped() {
        let games: Vec<Game> = (1..=15).map(|i| game(i, &format!("Game {i}"))).collect();
        let refs: Vec<&Game> = games.iter().collect();
        let lines = format_match_lines(&refs);
        assert_eq!(lines.len(), MAX_LISTED_MATCHES);
        assert_eq!(lines[0], "1. **Game 1** (ID: 1)");
    }
}
