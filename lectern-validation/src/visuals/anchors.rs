//! Teachable-moment extraction from transcript text.

use crate::text::{extract_bracket_sequences, extract_inline_code, split_sentences};

const EXAMPLE_PHRASES: [&str; 5] = ["for example", "consider", "suppose", "let's say", "let us say"];

const PITFALL_PHRASES: [&str; 3] = ["watch out", "common mistake", "misconception"];

const MECHANISM_KEYWORDS: [&str; 12] = [
    "pointer",
    "pointers",
    "dereference",
    "index",
    "indexing",
    "stack",
    "heap",
    "offset",
    "address",
    "arithmetic",
    "iterate",
    "step by step",
];

/// Anchors found in a transcript chunk.
///
/// `example_count` counts the example-type anchors (example phrases,
/// bracketed sequences, inline code, verbatim snippets) and becomes the
/// lower bound on how many visuals the chunk must produce.
#[derive(Debug, Clone)]
pub struct AnchorSet {
    pub anchors: Vec<String>,
    pub example_count: usize,
}

/// Scan a transcript chunk for sentences worth visualizing.
///
/// A sentence anchors if it introduces an example, shows a bracketed
/// numeric sequence or inline code, warns about a pitfall, or names a
/// memory/mechanism keyword. Code snippets that occur verbatim in the
/// chunk are appended as anchors of their own. De-duplicated preserving
/// first-seen order.
pub fn extract_visual_anchors(transcript_chunk: &str, code_snippets: &[String]) -> AnchorSet {
    let mut anchors: Vec<String> = Vec::new();
    let mut example_count = 0;

    for sentence in split_sentences(transcript_chunk) {
        let lower = sentence.to_lowercase();
        let has_example_phrase = EXAMPLE_PHRASES.iter().any(|p| lower.contains(p));
        let has_pitfall = PITFALL_PHRASES.iter().any(|p| lower.contains(p));
        let has_mechanism = MECHANISM_KEYWORDS.iter().any(|k| lower.contains(k));
        let has_bracket = !extract_bracket_sequences(&sentence).is_empty();
        let has_inline_code = !extract_inline_code(&sentence).is_empty();

        if has_example_phrase || has_bracket || has_inline_code {
            anchors.push(sentence.clone());
            example_count += 1;
        }
        if has_pitfall || has_mechanism {
            anchors.push(sentence);
        }
    }

    for snippet in code_snippets {
        if !snippet.is_empty() && transcript_chunk.contains(snippet.as_str()) {
            anchors.push(snippet.clone());
            example_count += 1;
        }
    }

    AnchorSet {
        anchors: unique_preserve_order(anchors),
        example_count,
    }
}

fn unique_preserve_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| !item.is_empty() && seen.insert(item.clone()))
        .collect()
}
