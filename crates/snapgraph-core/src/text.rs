//! Token extraction from captions and comments.
//!
//! A token is `#` or `@` followed by a maximal run of ASCII letters, digits
//! or underscores. Tokens are returned in first-occurrence order with their
//! case preserved and without de-duplication.

use std::sync::LazyLock;

use regex::Regex;

static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([A-Za-z0-9_]+)").expect("valid hashtag pattern"));

static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([A-Za-z0-9_]+)").expect("valid mention pattern"));

fn capture_all(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Extracts hashtag words (without the `#`).
pub fn extract_hashtags(text: &str) -> Vec<String> {
    capture_all(&HASHTAG, text)
}

/// Extracts mentioned usernames (without the `@`).
pub fn extract_mentions(text: &str) -> Vec<String> {
    capture_all(&MENTION, text)
}
