//! Prompts for general lectures, tie-ins, and Q&A.

use lectern_core::constants::{MIN_CHUNK_WORDS, MIN_LECTURE_CHUNKS, MIN_TOTAL_WORDS};
use lectern_core::models::lecture::LectureLevel;

pub const GENERAL_SYSTEM_INSTRUCTION: &str = "You are a calm, structured teaching assistant. \
You generate reusable, course-agnostic lecture content as strict JSON and nothing else.";

pub const LECTURE_REPAIR_SYSTEM_INSTRUCTION: &str = "You receive malformed JSON for a general \
lecture. Repair it to satisfy the lecture schema and every listed rule. Return JSON only.";

/// Literal schema example embedded in the lecture prompt. The model copies
/// shapes far more reliably than it follows prose descriptions.
const LECTURE_SCHEMA_EXAMPLE: &str = r#"{
  "chunks": [
    {
      "chunkTitle": "The core intuition",
      "narration": "Plain spoken narration for this chunk...",
      "boardOps": [
        { "op": "rect", "x": 24, "y": 20, "w": 120, "h": 50, "label": "idea" },
        { "op": "arrow", "from": [144, 45], "to": [200, 45], "label": "link" }
      ]
    }
  ],
  "confusionMode": {
    "summary": "One-sentence restatement of the single core idea.",
    "boardOps": [ { "op": "text", "x": 18, "y": 20, "text": "one core idea" } ]
  }
}"#;

/// Build the primary general-lecture prompt.
pub fn general_lecture_prompt(
    topic_name: &str,
    topic_context: &str,
    level: LectureLevel,
    style_version: &str,
) -> String {
    format!(
        "Generate a reusable, course-agnostic lecture.\n\
         Topic: \"{topic_name}\"\n\
         Topic context: \"{topic_context}\"\n\
         Depth: {level}\n\
         Style: {style_version}\n\
         \n\
         Rules:\n\
         - At least {min_chunks} chunks.\n\
         - Every chunk narration is at least {min_chunk_words} words; \
           total narration is at least {min_total_words} words.\n\
         - Do NOT mention specific courses, professors, dates, assignments, or textbooks.\n\
         - Use a calm, clear, non-judgmental tone; prefer intuition and analogies.\n\
         - boardOps are sparse: 0-2 simple ops per chunk (boxes, arrows, labels only).\n\
         - confusionMode restates ONE core idea, no new concepts.\n\
         - Do NOT include topQuestions or any field outside the schema.\n\
         \n\
         Return STRICT JSON matching this schema exactly:\n{schema}",
        topic_name = topic_name,
        topic_context = topic_context,
        level = level.as_str(),
        style_version = style_version,
        min_chunks = MIN_LECTURE_CHUNKS,
        min_chunk_words = MIN_CHUNK_WORDS,
        min_total_words = MIN_TOTAL_WORDS,
        schema = LECTURE_SCHEMA_EXAMPLE,
    )
}

/// Build the repair prompt: the same schema plus the broken text and the
/// validation errors the first attempt accumulated.
pub fn lecture_repair_prompt(raw: &str, errors: &[String]) -> String {
    format!(
        "The JSON below was rejected for these reasons:\n{errors}\n\
         \n\
         Broken JSON:\n{raw}\n\
         \n\
         Return corrected STRICT JSON matching this schema exactly:\n{schema}",
        errors = bullet_list(errors),
        raw = raw,
        schema = LECTURE_SCHEMA_EXAMPLE,
    )
}

pub const TIE_IN_SYSTEM_INSTRUCTION: &str = "You are a calm, structured teaching assistant. \
You write short, course-specific tie-in sentences as strict JSON and nothing else.";

pub const TIE_IN_REPAIR_SYSTEM_INSTRUCTION: &str = "You receive malformed JSON for course \
tie-ins. Repair it to a {\"tieIns\": [...]} object with the requested count. Return JSON only.";

/// Build the tie-in prompt: one short connective sentence per lecture chunk.
pub fn tie_in_prompt(
    course_name: &str,
    topic_name: &str,
    topic_context: &str,
    topic_ordering: &str,
    chunk_count: usize,
    tie_in_version: &str,
) -> String {
    format!(
        "Write course-specific tie-ins.\n\
         Course: \"{course_name}\"\n\
         Topic: \"{topic_name}\"\n\
         Topic context: \"{topic_context}\"\n\
         Ordering context: \"{topic_ordering}\"\n\
         Style: {tie_in_version}\n\
         \n\
         Rules:\n\
         - Exactly {chunk_count} entries, one per lecture chunk, in order.\n\
         - 1-2 sentences max per entry.\n\
         - Do NOT introduce new concepts; reference course context lightly.\n\
         \n\
         Return STRICT JSON: {{ \"tieIns\": [\"...\", \"...\"] }}",
        course_name = course_name,
        topic_name = topic_name,
        topic_context = topic_context,
        topic_ordering = topic_ordering,
        tie_in_version = tie_in_version,
        chunk_count = chunk_count,
    )
}

pub fn tie_in_repair_prompt(raw: &str, errors: &[String], chunk_count: usize) -> String {
    format!(
        "The JSON below was rejected for these reasons:\n{errors}\n\
         \n\
         Broken JSON:\n{raw}\n\
         \n\
         Return corrected STRICT JSON: {{ \"tieIns\": [...] }} with exactly {chunk_count} entries.",
        errors = bullet_list(errors),
        raw = raw,
        chunk_count = chunk_count,
    )
}

pub const QUESTION_SYSTEM_INSTRUCTION: &str = "You are a calm, structured teaching assistant. \
You answer learner questions briefly as strict JSON and nothing else.";

pub const QUESTION_REPAIR_SYSTEM_INSTRUCTION: &str = "You receive malformed JSON for a lecture \
answer. Repair it to {\"answer\": \"...\", \"boardOps\": [...]}. Return JSON only.";

/// Build the Q&A prompt. Chunk titles and tie-ins, when available, give the
/// model the lecture context without re-sending full narration.
pub fn question_prompt(
    course_name: &str,
    topic_name: &str,
    topic_context: &str,
    question: &str,
    chunk_titles: &[String],
    tie_ins: &[String],
) -> String {
    let mut context = String::new();
    if !chunk_titles.is_empty() {
        context.push_str("Lecture outline:\n");
        context.push_str(&bullet_list(chunk_titles));
        context.push('\n');
    }
    if !tie_ins.is_empty() {
        context.push_str("Course tie-ins:\n");
        context.push_str(&bullet_list(tie_ins));
        context.push('\n');
    }

    format!(
        "Answer the learner's question briefly and calmly.\n\
         Course: \"{course_name}\"\n\
         Topic: \"{topic_name}\"\n\
         Topic context: \"{topic_context}\"\n\
         {context}\
         Question: \"{question}\"\n\
         \n\
         Rules:\n\
         - Keep it short (3-5 sentences).\n\
         - If a simple diagram helps, return 1-3 whiteboard ops only.\n\
         - Do NOT re-teach the entire lecture.\n\
         \n\
         Return STRICT JSON: {{ \"answer\": \"...\", \"boardOps\": [ ... ] }}",
        course_name = course_name,
        topic_name = topic_name,
        topic_context = topic_context,
        context = context,
        question = question,
    )
}

pub fn question_repair_prompt(raw: &str, errors: &[String]) -> String {
    format!(
        "The JSON below was rejected for these reasons:\n{errors}\n\
         \n\
         Broken JSON:\n{raw}\n\
         \n\
         Return corrected STRICT JSON: {{ \"answer\": \"...\", \"boardOps\": [ ... ] }}",
        errors = bullet_list(errors),
        raw = raw,
    )
}

/// Render items as a `- item` list, one per line.
pub(crate) fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
