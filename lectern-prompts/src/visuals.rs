//! Prompts for transcript-anchored visuals.

use lectern_core::constants::{MAX_VISUALS_PER_CHUNK, MIN_VISUALS_PER_CHUNK};

use crate::lecture::bullet_list;

/// The base visual contract, sent as the system instruction for both the
/// primary and repair calls. Everything the validator enforces is stated
/// here so a repair attempt can fix a specific violated rule.
pub const BASE_VISUAL_CONTRACT: &str = "You produce visuals for a transcript chunk as strict \
JSON and nothing else.\n\
BASE VISUAL CONTRACT:\n\
- Output is either an array of visuals, or a single object \
{\"needs_clarification\": {\"reason\": \"...\", \"questions\": [\"...\"]}}.\n\
- Each visual: {\"id\", \"type\", \"anchor_quote\", \"title\", \"caption\", \"content\"}.\n\
- type is one of: memory_diagram, table, flowchart, timeline, graph, code_trace.\n\
- anchor_quote is an EXACT substring of the transcript chunk. Never paraphrase it.\n\
- caption is 1-2 sentences.\n\
- Never describe an array as pointing to a pointer.\n\
- memory_diagram arrays use contiguous cell indices 0..n-1; arrows originate from \
pointer variables and carry a to_address.\n\
- Never invent memory addresses; only use addresses that appear in the transcript or code.";

pub const VISUALS_REPAIR_SYSTEM_INSTRUCTION: &str = "You receive malformed JSON for \
transcript-anchored visuals. Repair it to satisfy the BASE VISUAL CONTRACT. Return JSON only.";

/// Inputs for the primary visuals prompt.
#[derive(Debug, Clone)]
pub struct VisualsPromptInput<'a> {
    pub transcript_chunk: &'a str,
    pub code_snippets: &'a [String],
    pub anchors: &'a [String],
    pub example_count: usize,
    pub selected_domains: &'a [&'static str],
}

/// Build the primary visuals prompt for one transcript chunk.
pub fn visuals_prompt(input: &VisualsPromptInput<'_>) -> String {
    let snippets = if input.code_snippets.is_empty() {
        String::from("(none)")
    } else {
        input.code_snippets.join("\n")
    };
    let domains = if input.selected_domains.is_empty() {
        String::from("(none)")
    } else {
        input.selected_domains.join(", ")
    };

    format!(
        "Transcript chunk:\n{transcript}\n\
         \n\
         Code snippets:\n{snippets}\n\
         \n\
         Detected domains: {domains}\n\
         \n\
         Anchors that MUST each be covered by at least one visual's anchor_quote:\n{anchors}\n\
         \n\
         Rules:\n\
         - Produce {min}-{max} visuals, and at least {example_count} \
           (one per concrete example above).\n\
         - Unique ids.\n\
         - If the transcript gives you nothing concrete to draw, return the \
           needs_clarification object instead of inventing content.",
        transcript = input.transcript_chunk,
        snippets = snippets,
        domains = domains,
        anchors = bullet_list(input.anchors),
        min = MIN_VISUALS_PER_CHUNK,
        max = MAX_VISUALS_PER_CHUNK,
        example_count = input.example_count,
    )
}

/// Build the repair prompt: broken output plus the exact rule violations,
/// so the model can target what it got wrong.
pub fn visuals_repair_prompt(
    raw: &str,
    input: &VisualsPromptInput<'_>,
    errors: &[String],
) -> String {
    format!(
        "Your previous output violated these rules:\n{errors}\n\
         \n\
         Previous output:\n{raw}\n\
         \n\
         Transcript chunk (anchor_quote must be an exact substring of this):\n{transcript}\n\
         \n\
         Anchors that MUST each be covered:\n{anchors}\n\
         \n\
         Return corrected JSON satisfying the BASE VISUAL CONTRACT.",
        errors = bullet_list(errors),
        raw = raw,
        transcript = input.transcript_chunk,
        anchors = bullet_list(input.anchors),
    )
}
