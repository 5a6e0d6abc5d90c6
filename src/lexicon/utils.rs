//! Text normalization helpers shared by the extractors

use std::sync::OnceLock;
use regex::Regex;

static WHITESPACE_RUN: OnceLock<Regex> = OnceLock::new();

fn whitespace_regex() -> &'static Regex {
    WHITESPACE_RUN.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex pattern"))
}

/// Collapses every whitespace run to a single space and trims both ends.
pub fn squash(text: &str) -> String {
    whitespace_regex().replace_all(text, " ").trim().to_string()
}

/// Normalizes text taken from a LIFT document.
///
/// Underscores become spaces, then whitespace is squashed, so `"a_ b"` and
/// `"a b"` produce the same grouping key.
pub fn clean_text(text: &str) -> String {
    squash(&text.replace('_', " "))
}

/// Returns `Some(text)` unless `text` is empty.
pub fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
