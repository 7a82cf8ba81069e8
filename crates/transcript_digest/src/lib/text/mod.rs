//! # Text
//!
//! Pure, allocation-only passes over transcript text: normalization, the keyword
//! safety gate, the optional language gate and sentence segmentation.

pub mod language;
pub mod safety;
pub mod segmenter;

use std::sync::LazyLock;

use regex::Regex;

static BRACKETED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\[.*?\]").unwrap());
static PARENTHESIZED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\(.*?\)").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strips `[...]` and `(...)` annotations such as `[Music]` or `(applause)`,
/// collapses whitespace runs to one space and trims the ends.
///
/// Applying it to its own output returns the input unchanged.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = BRACKETED_RE.replace_all(raw, "");
    let text = PARENTHESIZED_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");

    text.trim().to_string()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
