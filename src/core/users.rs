//! Discord ↔ Steam user resolution.
//!
//! Validation for `/link-steam`, and the member filtering and lookups used by `/sharedgame`.

use crate::backend::models::UserMapping;

/// Minimum accepted Steam username length.
pub const MIN_USERNAME_LEN: usize = 3;
/// Maximum accepted Steam username length.
pub const MAX_USERNAME_LEN: usize = 32;

/// Whether `value` looks like a 64-bit Steam ID (exactly 17 ASCII digits).
#[must_use]
pub fn is_valid_steam_id(value: &str) -> bool {
    value.len() == 17 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Whether `username` has an acceptable length.
#[must_use]
pub fn is_valid_username(username: &str) -> bool {
    (MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&username.chars().count())
}

/// A member of a voice channel, reduced to what filtering needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceMember {
    /// Discord user ID
    pub user_id: String,
    /// Server display name
    pub display_name: String,
    /// Account username
    pub username: String,
    /// Global display name, if set
    pub global_name: Option<String>,
}

/// Members left after applying a blacklist, and the display names that were removed.
#[derive(Debug, Default)]
pub struct BlacklistResult {
    /// Members still included
    pub kept: Vec<VoiceMember>,
    /// Display names of excluded members
    pub excluded: Vec<String>,
}

/// Splits a comma-separated list, trimming entries and dropping empty ones.
#[must_use]
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Removes members whose display name, username or global name contains any blacklist entry.
///
/// Matching is case-insensitive substring matching.
#[must_use]
pub fn apply_blacklist(members: Vec<VoiceMember>, blacklist: &str) -> BlacklistResult {
    let entries: Vec<String> = split_list(blacklist)
        .into_iter()
        .map(|entry| entry.to_lowercase())
        .collect();

    let mut result = BlacklistResult::default();
    for member in members {
        let display = member.display_name.to_lowercase();
        let username = member.username.to_lowercase();
        let global = member
            .global_name
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();

        let blocked = entries.iter().any(|entry| {
            display.contains(entry.as_str())
                || username.contains(entry.as_str())
                || global.contains(entry.as_str())
        });

        if blocked {
            result.excluded.push(member.display_name);
        } else {
            result.kept.push(member);
        }
    }
    result
}

/// Steam ID linked to a Discord user, if any.
#[must_use]
pub fn steam_id_for_discord<'a>(discord_id: &str, mappings: &'a [UserMapping]) -> Option<&'a str> {
    mappings
        .iter()
        .find(|m| m.discord_id.as_deref() == Some(discord_id))
        .map(|m| m.steam_id.as_str())
}

/// Steam IDs and display names of a set of players, in input order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ResolvedPlayers {
    /// `(steam_id, display_name)` pairs, one per distinct Steam ID
    pub players: Vec<(String, String)>,
    /// Entries that could not be resolved
    pub not_found: Vec<String>,
}

impl ResolvedPlayers {
    /// Adds a player unless the Steam ID is already present.
    pub fn push(&mut self, steam_id: &str, display_name: &str) {
        if !self.players.iter().any(|(id, _)| id == steam_id) {
            self.players
                .push((steam_id.to_string(), display_name.to_string()));
        }
    }

    /// Steam IDs in order.
    #[must_use]
    pub fn steam_ids(&self) -> Vec<String> {
        self.players.iter().map(|(id, _)| id.clone()).collect()
    }

    /// Display names in order.
    #[must_use]
    pub fn display_names(&self) -> Vec<&str> {
        self.players.iter().map(|(_, name)| name.as_str()).collect()
    }
}

/// Resolves voice channel members to Steam accounts; unlinked members are skipped.
#[must_use]
pub fn resolve_members(members: &[VoiceMember], mappings: &[UserMapping]) -> ResolvedPlayers {
    let mut resolved = ResolvedPlayers::default();
    for member in members {
        match steam_id_for_discord(&member.user_id, mappings) {
            Some(steam_id) => resolved.push(steam_id, &member.display_name),
            None => resolved.not_found.push(member.display_name.clone()),
        }
    }
    resolved
}

/// Resolves a comma-separated list of Steam IDs, usernames or nicknames.
///
/// 17-digit entries are matched against Steam IDs; anything else against username or
/// nickname, case-insensitively.
#[must_use]
pub fn resolve_user_list(input: &str, mappings: &[UserMapping]) -> ResolvedPlayers {
    let mut resolved = ResolvedPlayers::default();

    for entry in split_list(input) {
        let mapping = if is_valid_steam_id(&entry) {
            mappings.iter().find(|m| m.steam_id == entry)
        } else {
            let wanted = entry.to_lowercase();
            mappings.iter().find(|m| {
                m.username.to_lowercase() == wanted
                    || m.nickname
                        .as_deref()
                        .is_some_and(|nick| nick.to_lowercase() == wanted)
            })
        };

        match mapping {
            Some(m) => resolved.push(&m.steam_id, m.display_name()),
            None => resolved.not_found.push(entry),
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mapping, voice_member};

    #[test]
    fn test_steam_id_validation() {
        assert!(is_valid_steam_id("76561197960287930"));
        assert!(!is_valid_steam_id("7656119796028793"));
        assert!(!is_valid_steam_id("765611979602879301"));
        assert!(!is_valid_steam_id("7656119796028793a"));
        assert!(!is_valid_steam_id(""));
    }

    #[test]
    fn test_username_validation() {
        assert!(!is_valid_username("ab"));
        assert!(is_valid_username("abc"));
        assert!(is_valid_username(&"x".repeat(32)));
        assert!(!is_valid_username(&"x".repeat(33)));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" a, ,b ,, c "), vec!["a", "b", "c"]);
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_blacklist_matches_any_name_case_insensitively() {
        let members = vec![
            voice_member("1", "Alice", "alice_w", None),
            voice_member("2", "Bobby", "rob", Some("Robert")),
            voice_member("3", "Carol", "carol", None),
        ];
        let result = apply_blacklist(members, "ROB, nobody");
        let kept: Vec<&str> = result.kept.iter().map(|m| m.user_id.as_str()).collect();
        assert_eq!(kept, vec!["1", "3"]);
        assert_eq!(result.excluded, vec!["Bobby"]);
    }

    #[test]
    fn test_blacklist_substring_on_global_name() {
        let members = vec![voice_member("1", "x", "y", Some("TheAfkGuy"))];
        let result = apply_blacklist(members, "afk");
        assert!(result.kept.is_empty());
        assert_eq!(result.excluded, vec!["x"]);
    }

    #[test]
    fn test_empty_blacklist_keeps_everyone() {
        let members = vec![voice_member("1", "Alice", "alice", None)];
        let result = apply_blacklist(members, " , ");
        assert_eq!(result.kept.len(), 1);
        assert!(result.excluded.is_empty());
    }

    #[test]
    fn test_resolve_members() {
        let mappings = vec![
            mapping("76561190000000001", "alice", None, Some("1")),
            mapping("76561190000000002", "bob", Some("Bob"), Some("2")),
        ];
        let members = vec![
            voice_member("1", "Alice!", "alice", None),
            voice_member("9", "Stranger", "stranger", None),
            voice_member("2", "Bobby", "bob", None),
        ];
        let resolved = resolve_members(&members, &mappings);
        assert_eq!(
            resolved.steam_ids(),
            vec!["76561190000000001", "76561190000000002"]
        );
        assert_eq!(resolved.display_names(), vec!["Alice!", "Bobby"]);
        assert_eq!(resolved.not_found, vec!["Stranger"]);
    }

    #[test]
    fn test_resolve_user_list_by_id_username_and_nickname() {
        let mappings = vec![
            mapping("76561190000000001", "alice", None, None),
            mapping("76561190000000002", "bob_s", Some("Bob"), None),
            mapping("76561190000000003", "carol", Some("Caz"), None),
        ];
        let resolved =
            resolve_user_list("76561190000000001, BOB, carol, dave, 76561199999999999", &mappings);
        assert_eq!(
            resolved.players,
            vec![
                ("76561190000000001".to_string(), "alice".to_string()),
                ("76561190000000002".to_string(), "Bob".to_string()),
                ("76561190000000003".to_string(), "Caz".to_string()),
            ]
        );
        assert_eq!(resolved.not_found, vec!["dave", "76561199999999999"]);
    }

    #[test]
    fn test_resolve_user_list_deduplicates_accounts() {
        let mappings = vec![mapping("76561190000000002", "bob_s", Some("Bob"), None)];
        let resolved = resolve_user_list("bob, bob_s, 76561190000000002", &mappings);
        assert_eq!(resolved.steam_ids(), vec!["76561190000000002"]);
        assert!(resolved.not_found.is_empty());
    }
}
