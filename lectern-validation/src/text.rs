//! Text utilities shared by the validators and the anchor extractor.

use std::sync::LazyLock;

use regex::Regex;

static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static BRACKET_SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[0-9,\s]+\]").unwrap());

/// Split text into trimmed sentences after `.`, `!`, or `?` followed by
/// whitespace (or end of text). Decimal points and version numbers do not
/// split because no whitespace follows the terminator.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().map_or(true, |next| next.is_whitespace()) {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    sentences
}

/// Whitespace-delimited word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Backtick-delimited inline code snippets, trimmed, empties dropped.
pub fn extract_inline_code(text: &str) -> Vec<String> {
    INLINE_CODE
        .captures_iter(text)
        .filter_map(|cap| {
            let snippet = cap[1].trim();
            (!snippet.is_empty()).then(|| snippet.to_string())
        })
        .collect()
}

/// Bracketed numeric sequences like `[1, 2, 3]`.
pub fn extract_bracket_sequences(text: &str) -> Vec<String> {
    BRACKET_SEQUENCE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
