// ABOUTME: Post-processing of generated coaching text before it is cached
// ABOUTME: Strips greetings, collapses whitespace, and caps sentence count and length
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

use regex::Regex;
use std::sync::LazyLock;

use crate::config::InsightConfig;

/// Appended when text is cut at the character cap
const ELLIPSIS: char = '…';

static GREETING_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: "Hallo Anna,", "Hi!", "Guten Morgen:", "Liebe Sarah Maria,", "Hey Tom\n"
    // A greeting word followed by lowercase text is content ("Hey you hit ...")
    Regex::new(
        r"^\s*(?i:hallo|hello|hi|hey|dear|guten\s+(?:morgen|tag|abend)|liebe[rs]?)\b(?:\s+\p{Lu}[\p{L}-]*(?:\s+\p{Lu}[\p{L}-]*)?)?\s*[,!:\n]\s*",
    )
    .ok()
});

/// Tokens whose trailing period does not end a sentence (lowercase, period stripped)
const ABBREVIATIONS: &[&str] = &[
    "ca", "bzw", "u.a", "etc", "evtl", "ggf", "usw", "inkl", "vgl", "d.h", "z.b", "e.g", "i.e",
    "approx",
];

/// Clean generated text for display and caching
///
/// Steps, in order: strip one leading greeting, collapse all whitespace to
/// single spaces, keep at most `max_sentences` sentences, cap at `max_chars`
/// characters (appending `…` when cut). May return an empty string.
#[must_use]
pub fn sanitize_insight(text: &str, config: &InsightConfig) -> String {
    let without_greeting = strip_greeting(text);
    let collapsed = without_greeting
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let limited = split_sentences(&collapsed)
        .into_iter()
        .take(config.max_sentences)
        .collect::<Vec<_>>()
        .join(" ");

    truncate_chars(&limited, config.max_chars)
}

fn strip_greeting(text: &str) -> &str {
    GREETING_PATTERN
        .as_ref()
        .and_then(|pattern| pattern.find(text))
        .map_or(text, |found| &text[found.end()..])
}

/// Split single-spaced text after runs of `.`, `!` or `?` followed by a space
///
/// Decimal points ("2.5 kg") do not end a sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(_, next)) = chars.peek() {
            if matches!(next, '.' | '!' | '?') || !next.is_whitespace() {
                continue;
            }
            if ch == '.' && ends_with_abbreviation(&text[start..index]) {
                continue;
            }
        }
        let end = index + ch.len_utf8();
        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = end;
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

/// Whether the word before a period is an abbreviation or a single letter ("z. B.")
fn ends_with_abbreviation(before_period: &str) -> bool {
    let word = before_period
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .trim_start_matches(['(', '"', '\'']);
    let mut letters = word.chars();
    if let (Some(first), None) = (letters.next(), letters.next()) {
        return first.is_alphabetic();
    }
    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let keep = max_chars.saturating_sub(1);
    let mut cut: String = text.chars().take(keep).collect();
    cut.truncate(cut.trim_end().len());
    cut.push(ELLIPSIS);
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_keeps_decimals() {
        let sentences = split_sentences("Eat 2.5 portions. Great job! Ready? Go");
        assert_eq!(
            sentences,
            vec!["Eat 2.5 portions.", "Great job!", "Ready?", "Go"]
        );
    }

    #[test]
    fn test_split_sentences_treats_terminator_runs_as_one() {
        assert_eq!(
            split_sentences("Wow!?! Next... done."),
            vec!["Wow!?!", "Next...", "done."]
        );
    }

    #[test]
    fn test_split_sentences_skips_abbreviations() {
        assert_eq!(
            split_sentences("Iss z. B. Quark mit ca. 30 g Protein. Trinke Wasser."),
            vec!["Iss z. B. Quark mit ca. 30 g Protein.", "Trinke Wasser."]
        );
        assert_eq!(
            split_sentences("Gemüse, Obst u.a. Beeren. Fertig."),
            vec!["Gemüse, Obst u.a. Beeren.", "Fertig."]
        );
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("Müsli über alles", 6), "Müsli…");
        assert_eq!(truncate_chars("kurz", 10), "kurz");
    }

    #[test]
    fn test_strip_greeting_requires_name_and_punctuation() {
        assert_eq!(strip_greeting("Hallo Anna, weiter so."), "weiter so.");
        assert_eq!(strip_greeting("Hi!  Los geht's."), "Los geht's.");
        assert_eq!(
            strip_greeting("Hey you hit every target."),
            "Hey you hit every target."
        );
        assert_eq!(
            strip_greeting("Highlights this week: protein."),
            "Highlights this week: protein."
        );
    }
}
