//! Quote citation parser.
//!
//! Recognises two lightweight formats in chat messages:
//!
//! ```text
//! "Never split the party" - Alice
//! ```
//!
//! ```text
//! Alice: "Who brought the snacks?"
//! Bob: "Not me"
//! ```
//!
//! Anything else is ordinary chat and yields `None`.

use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)] // Literal pattern, checked by tests
static SINGLE_ATTRIBUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^"(.+)"\s*-\s*(.+)$"#).expect("single attribution pattern is valid")
});

// No end anchor: text after the closing quote is tolerated.
#[allow(clippy::expect_used)]
static SPEAKER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(.+?)\s*:\s*"(.+)""#).expect("speaker line pattern is valid")
});

/// A quote extracted from a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuote {
    /// The quote body. For conversations, one `Speaker: "text"` line per utterance.
    pub quote_text: String,
    /// Distinct speakers in order of first appearance
    pub quoted_persons: Vec<String>,
}

/// Parses `text` as a quote citation, returning `None` for ordinary messages.
///
/// The single-attribution form is tried first, then the multi-speaker form, which needs at
/// least two lines and rejects the whole message if any line is malformed.
#[must_use]
pub fn parse_quote(text: &str) -> Option<ParsedQuote> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    parse_single_attribution(trimmed).or_else(|| parse_conversation(trimmed))
}

fn parse_single_attribution(text: &str) -> Option<ParsedQuote> {
    let captures = SINGLE_ATTRIBUTION.captures(text)?;
    let quote = captures[1].trim();
    let person = captures[2].trim();
    if quote.is_empty() || person.is_empty() {
        return None;
    }

    Some(ParsedQuote {
        quote_text: quote.to_string(),
        quoted_persons: vec![person.to_string()],
    })
}

fn parse_conversation(text: &str) -> Option<ParsedQuote> {
    let mut lines = Vec::new();
    let mut speakers: Vec<String> = Vec::new();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let captures = SPEAKER_LINE.captures(line)?;
        let speaker = captures[1].trim();
        let said = captures[2].trim();
        if speaker.is_empty() {
            return None;
        }

        lines.push(format!("{speaker}: \"{said}\""));
        if !speakers.iter().any(|known| known == speaker) {
            speakers.push(speaker.to_string());
        }
    }

    if lines.len() < 2 {
        return None;
    }

    Some(ParsedQuote {
        quote_text: lines.join("\n"),
        quoted_persons: speakers,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_single_attribution() {
        let parsed = parse_quote("\"I am the danger\" - Walter").unwrap();
        assert_eq!(parsed.quote_text, "I am the danger");
        assert_eq!(parsed.quoted_persons, vec!["Walter"]);
    }

    #[test]
    fn test_single_attribution_trims_whitespace() {
        let parsed = parse_quote("   \"  spaced out   \"   -    Jesse Pinkman  \n")
            .unwrap();
        assert_eq!(parsed.quote_text, "spaced out");
        assert_eq!(parsed.quoted_persons, vec!["Jesse Pinkman"]);
    }

    #[test]
    fn test_single_attribution_keeps_inner_quotes() {
        let parsed =
            parse_quote("\"he said \"no\" twice\" - Sam").unwrap();
        assert_eq!(parsed.quote_text, "he said \"no\" twice");
        assert_eq!(parsed.quoted_persons, vec!["Sam"]);
    }

    #[test]
    fn test_conversation() {
        let parsed = parse_quote("Alice: \"hi\"\nBob: \"bye\"").unwrap();
        assert_eq!(parsed.quote_text, "Alice: \"hi\"\nBob: \"bye\"");
        assert_eq!(parsed.quoted_persons, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_conversation_deduplicates_speakers_but_keeps_lines() {
        let parsed =
            parse_quote("Alice: \"hi\"\nAlice: \"again\"").unwrap();
        assert_eq!(parsed.quote_text, "Alice: \"hi\"\nAlice: \"again\"");
        assert_eq!(parsed.quoted_persons, vec!["Alice"]);
    }

    #[test]
    fn test_conversation_speaker_order_is_first_seen() {
        let parsed = parse_quote("Bob: \"1\"\nAlice: \"2\"\nBob: \"3\"\nCarol: \"4\"")
            .unwrap();
        assert_eq!(parsed.quoted_persons, vec!["Bob", "Alice", "Carol"]);
    }

    #[test]
    fn test_conversation_speakers_are_case_sensitive() {
        let parsed = parse_quote("alice: \"a\"\nAlice: \"b\"").unwrap();
        assert_eq!(parsed.quoted_persons, vec!["alice", "Alice"]);
    }

    #[test]
    fn test_conversation_normalises_lines() {
        let parsed = parse_quote("  Alice  :   \"  hi there \"  \r\n\n\n   Bob:\"bye\"  ")
            .unwrap();
        assert_eq!(parsed.quote_text, "Alice: \"hi there\"\nBob: \"bye\"");
        assert_eq!(parsed.quoted_persons, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_conversation_tolerates_trailing_text() {
        let parsed = parse_quote("Alice: \"hi\" (whispering)\nBob: \"bye\"")
            .unwrap();
        assert_eq!(parsed.quote_text, "Alice: \"hi\"\nBob: \"bye\"");
    }

    #[test]
    fn test_conversation_speaker_may_contain_quotes() {
        let parsed = parse_quote("\"Bob\": \"hi\"\nAl \"The Pal\" Smith: \"yo\"").unwrap();
        assert_eq!(
            parsed.quoted_persons,
            vec!["\"Bob\"", "Al \"The Pal\" Smith"]
        );
        assert_eq!(
            parsed.quote_text,
            "\"Bob\": \"hi\"\nAl \"The Pal\" Smith: \"yo\""
        );
    }

    #[test]
    fn test_conversation_rejects_any_bad_line() {
        assert_eq!(
            parse_quote("Alice: \"hi\"\nthat was funny\nBob: \"bye\""),
            None
        );
    }

    #[test]
    fn test_conversation_needs_two_lines() {
        assert_eq!(parse_quote("Alice: \"hi\""), None);
        assert_eq!(parse_quote("Alice: \"hi\"\n\n   \n"), None);
    }

    #[test]
    fn test_ordinary_chat_is_not_a_quote() {
        assert_eq!(parse_quote("anyone up for a game tonight?"), None);
        assert_eq!(parse_quote("note: remember the snacks"), None);
        assert_eq!(parse_quote("\"unattributed\""), None);
        assert_eq!(parse_quote("\"dangling\" - "), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_quote(""), None);
        assert_eq!(parse_quote("   \n\t "), None);
    }

    #[test]
    fn test_single_form_does_not_span_lines() {
        // Two attribution lines are neither form
        assert_eq!(parse_quote("\"a\" - X\n\"b\" - Y"), None);
    }
}
