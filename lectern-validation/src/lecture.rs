//! Validators for general lectures, tie-in sets, and Q&A answers.

use serde_json::Value;

use lectern_core::constants::{
    MAX_ANSWER_BOARD_OPS, MAX_CONFUSION_SUMMARY_WORDS, MIN_CHUNK_WORDS, MIN_LECTURE_CHUNKS,
    MIN_TOTAL_WORDS,
};
use lectern_core::models::lecture::{GeneralLectureContent, LectureQuestionAnswer, WhiteboardOp};

use crate::text::{split_sentences, word_count};

const LECTURE_ROOT_KEYS: [&str; 4] = ["chunks", "confusionMode", "source", "diagnostics"];
const CHUNK_KEYS: [&str; 3] = ["chunkTitle", "narration", "boardOps"];
const CONFUSION_KEYS: [&str; 2] = ["summary", "boardOps"];

fn check_board_ops(value: &Value, location: &str, errors: &mut Vec<String>) -> usize {
    match serde_json::from_value::<Vec<WhiteboardOp>>(value.clone()) {
        Ok(ops) => ops.len(),
        Err(e) => {
            errors.push(format!("{location} boardOps malformed: {e}"));
            0
        }
    }
}

/// Validate a general lecture payload.
///
/// The strictest validator in the pipeline: an explicit key allow-list at
/// root and chunk level, a per-chunk narration floor, and an aggregate
/// narration floor summed independently of the per-chunk one.
pub fn validate_general_lecture(value: &Value) -> Result<GeneralLectureContent, Vec<String>> {
    let mut errors = Vec::new();

    let Some(root) = value.as_object() else {
        return Err(vec!["output must be a JSON object".to_string()]);
    };

    // topQuestions at the root is a known schema confusion: question content
    // belongs elsewhere entirely. Name it before the generic unknown-key pass.
    if root.contains_key("topQuestions") {
        errors.push("topQuestions is not allowed at the root".to_string());
    }
    for key in root.keys() {
        if key != "topQuestions" && !LECTURE_ROOT_KEYS.contains(&key.as_str()) {
            errors.push(format!("unexpected root key: {key}"));
        }
    }

    let mut total_words = 0;
    match root.get("chunks").and_then(Value::as_array) {
        Some(chunks) => {
            if chunks.len() < MIN_LECTURE_CHUNKS {
                errors.push(format!(
                    "at least {MIN_LECTURE_CHUNKS} chunks required, got {}",
                    chunks.len()
                ));
            }
            for (index, chunk) in chunks.iter().enumerate() {
                let Some(chunk_obj) = chunk.as_object() else {
                    errors.push(format!("chunk {index} must be an object"));
                    continue;
                };
                for key in chunk_obj.keys() {
                    if !CHUNK_KEYS.contains(&key.as_str()) {
                        errors.push(format!("chunk {index} has unexpected key: {key}"));
                    }
                }
                match chunk_obj.get("chunkTitle").and_then(Value::as_str) {
                    Some(title) if !title.trim().is_empty() => {}
                    _ => errors.push(format!("chunk {index} chunkTitle missing")),
                }
                match chunk_obj.get("narration").and_then(Value::as_str) {
                    Some(narration) => {
                        let words = word_count(narration);
                        total_words += words;
                        if words < MIN_CHUNK_WORDS {
                            errors.push(format!(
                                "chunk {index} narration below {MIN_CHUNK_WORDS} words ({words})"
                            ));
                        }
                    }
                    None => errors.push(format!("chunk {index} narration missing")),
                }
                if let Some(ops) = chunk_obj.get("boardOps") {
                    check_board_ops(ops, &format!("chunk {index}"), &mut errors);
                }
            }
            if total_words < MIN_TOTAL_WORDS {
                errors.push(format!(
                    "total narration below {MIN_TOTAL_WORDS} words ({total_words})"
                ));
            }
        }
        None => errors.push("chunks array missing".to_string()),
    }

    match root.get("confusionMode").and_then(Value::as_object) {
        Some(confusion) => {
            for key in confusion.keys() {
                if !CONFUSION_KEYS.contains(&key.as_str()) {
                    errors.push(format!("confusionMode has unexpected key: {key}"));
                }
            }
            match confusion.get("summary").and_then(Value::as_str) {
                Some(summary) if !summary.trim().is_empty() => {
                    // "No new concept" is checked structurally only: a long
                    // summary is treated as new material.
                    let words = word_count(summary);
                    if words > MAX_CONFUSION_SUMMARY_WORDS {
                        errors.push(format!(
                            "confusion summary above {MAX_CONFUSION_SUMMARY_WORDS} words ({words})"
                        ));
                    }
                }
                _ => errors.push("confusionMode summary missing".to_string()),
            }
            if let Some(ops) = confusion.get("boardOps") {
                check_board_ops(ops, "confusionMode", &mut errors);
            }
        }
        None => errors.push("confusionMode missing".to_string()),
    }

    if !errors.is_empty() {
        tracing::debug!(violations = errors.len(), "lecture: payload rejected");
        return Err(errors);
    }

    serde_json::from_value::<GeneralLectureContent>(value.clone())
        .map_err(|e| vec![format!("lecture payload failed to deserialize: {e}")])
}

/// Validate a tie-in set: a `{"tieIns": [...]}` envelope holding exactly one
/// short entry per lecture chunk.
pub fn validate_tie_ins(value: &Value, chunk_count: usize) -> Result<Vec<String>, Vec<String>> {
    let mut errors = Vec::new();

    let Some(root) = value.as_object() else {
        return Err(vec!["output must be a JSON object".to_string()]);
    };
    for key in root.keys() {
        if key != "tieIns" {
            errors.push(format!("unexpected root key: {key}"));
        }
    }

    let mut tie_ins = Vec::new();
    match root.get("tieIns").and_then(Value::as_array) {
        Some(entries) => {
            if entries.len() != chunk_count {
                errors.push(format!(
                    "tieIns must have exactly {chunk_count} entries, got {}",
                    entries.len()
                ));
            }
            for (index, entry) in entries.iter().enumerate() {
                match entry.as_str() {
                    Some(text) if !text.trim().is_empty() => {
                        if split_sentences(text).len() > 2 {
                            errors.push(format!("tie-in {index} must be 1-2 sentences"));
                        }
                        tie_ins.push(text.trim().to_string());
                    }
                    _ => errors.push(format!("tie-in {index} must be a non-empty string")),
                }
            }
        }
        None => errors.push("tieIns array missing".to_string()),
    }

    if errors.is_empty() {
        Ok(tie_ins)
    } else {
        Err(errors)
    }
}

/// Validate a Q&A answer payload.
pub fn validate_answer(value: &Value) -> Result<LectureQuestionAnswer, Vec<String>> {
    let mut errors = Vec::new();

    let Some(root) = value.as_object() else {
        return Err(vec!["output must be a JSON object".to_string()]);
    };
    for key in root.keys() {
        if key != "answer" && key != "boardOps" {
            errors.push(format!("unexpected root key: {key}"));
        }
    }

    match root.get("answer").and_then(Value::as_str) {
        Some(answer) if !answer.trim().is_empty() => {}
        _ => errors.push("answer missing".to_string()),
    }

    if let Some(ops) = root.get("boardOps") {
        let count = check_board_ops(ops, "answer", &mut errors);
        if count > MAX_ANSWER_BOARD_OPS {
            errors.push(format!(
                "answer boardOps capped at {MAX_ANSWER_BOARD_OPS}, got {count}"
            ));
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value::<LectureQuestionAnswer>(value.clone())
        .map_err(|e| vec![format!("answer payload failed to deserialize: {e}")])
}
