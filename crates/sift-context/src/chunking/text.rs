//! Small text normalisation helpers.

use regex::Regex;
use std::sync::LazyLock;

/// Any run of whitespace, including newlines.
static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"\s+") {
    Ok(regex) => regex,
    Err(err) => panic!("Whitespace regex is invalid: {err}"),
});

/// Runs of sentence-ending punctuation.
static TERMINATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"[.!?]+") {
    Ok(regex) => regex,
    Err(err) => panic!("Sentence terminator regex is invalid: {err}"),
});

/// Collapse every whitespace run to a single space and trim the ends.
pub fn clean_text(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_owned()
}

/// Split on runs of `.`, `!` and `?`, dropping empty fragments.
pub fn extract_sentences(text: &str) -> Vec<String> {
    TERMINATOR_REGEX
        .split(text)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Truncate to at most `max_chars` characters, appending `...` when cut.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        // Use char boundaries to avoid panics with multi-byte characters
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        text.to_owned()
    }
}
