//! Batch validation for the visuals of one transcript chunk.
//!
//! Error strings are stable contract: they are matched by tests and fed
//! verbatim into repair prompts, so the model is told exactly which rule
//! it violated.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use lectern_core::constants::{
    MAX_CAPTION_SENTENCES, MAX_VISUALS_PER_CHUNK, MIN_VISUALS_PER_CHUNK,
};
use lectern_core::models::visual::{
    DiagramArrow, DiagramVariable, NeedsClarification, VariableKind, VisualType, VisualsResult,
};

use crate::text::split_sentences;

/// Known failure mode: describing an array as if it held a pointer, which
/// is semantically backwards.
static ARRAY_POINTER_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)array\s+points\s+to\s+pointer").unwrap());

fn variables_of(content: &Value) -> Vec<DiagramVariable> {
    content
        .get("variables")
        .and_then(Value::as_array)
        .map(|vars| {
            vars.iter()
                .filter_map(|v| serde_json::from_value::<DiagramVariable>(v.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

fn arrows_of(content: &Value) -> Option<Vec<DiagramArrow>> {
    content.get("arrows").and_then(Value::as_array).map(|arrows| {
        arrows
            .iter()
            .filter_map(|a| serde_json::from_value::<DiagramArrow>(a.clone()).ok())
            .collect()
    })
}

fn validate_array_cells(variables: &[DiagramVariable], errors: &mut Vec<String>) {
    for variable in variables {
        if variable.kind != VariableKind::Array || variable.cells.is_empty() {
            continue;
        }
        let mut indices: Vec<i64> = variable.cells.iter().filter_map(|c| c.index).collect();
        if indices.is_empty() {
            errors.push("array cells missing indices".to_string());
            continue;
        }
        indices.sort_unstable();
        if indices
            .iter()
            .enumerate()
            .any(|(position, index)| *index != position as i64)
        {
            errors.push("array cells must be contiguous indices 0..n-1".to_string());
        }
    }
}

fn validate_pointer_arrows(
    variables: &[DiagramVariable],
    arrows: Option<&[DiagramArrow]>,
    errors: &mut Vec<String>,
) {
    let pointer_names: HashSet<&str> = variables
        .iter()
        .filter(|v| v.kind == VariableKind::Pointer)
        .map(|v| v.name.as_str())
        .collect();
    let array_names: HashSet<&str> = variables
        .iter()
        .filter(|v| v.kind == VariableKind::Array)
        .map(|v| v.name.as_str())
        .collect();

    if pointer_names.is_empty() {
        return;
    }
    let Some(arrows) = arrows.filter(|a| !a.is_empty()) else {
        errors.push("pointer arrows missing".to_string());
        return;
    };

    for arrow in arrows {
        let from = arrow.from.trim();
        if array_names.contains(from) {
            errors.push("array points to pointer or arrow from array".to_string());
        }
        if !pointer_names.contains(from) {
            errors.push("arrow must originate from pointer variable".to_string());
        }
        if arrow.to_address.as_deref().map_or(true, str::is_empty) {
            errors.push("pointer arrow missing to_address".to_string());
        }
    }
}

/// Validate a (normalized) visuals payload against one transcript chunk.
///
/// Accepts either a batch of 2-6 grounded visuals or a single
/// `needs_clarification` object. `anchors` and `example_count` come from
/// anchor extraction over the same chunk and bound what the batch must
/// cover.
pub fn validate_visual_output(
    value: &Value,
    transcript_chunk: &str,
    anchors: &[String],
    example_count: usize,
) -> Result<VisualsResult, Vec<String>> {
    let mut errors = Vec::new();

    // The alternate terminal variant: an explicit "can't visualize this".
    if let Some(clarification) = value.get("needs_clarification") {
        if clarification.is_object() {
            let reason_ok = clarification
                .get("reason")
                .and_then(Value::as_str)
                .map_or(false, |r| !r.trim().is_empty());
            if !reason_ok {
                errors.push("needs_clarification reason missing".to_string());
            }
            let question_count = clarification
                .get("questions")
                .and_then(Value::as_array)
                .map_or(0, Vec::len);
            if question_count == 0 {
                errors.push("needs_clarification questions missing".to_string());
            }
            if !errors.is_empty() {
                return Err(errors);
            }
            return serde_json::from_value::<NeedsClarification>(value.clone())
                .map(VisualsResult::NeedsClarification)
                .map_err(|e| vec![format!("needs_clarification failed to deserialize: {e}")]);
        }
    }

    let Some(visuals) = value.as_array() else {
        return Err(vec!["output must be an array of visuals".to_string()]);
    };

    if visuals.len() < MIN_VISUALS_PER_CHUNK || visuals.len() > MAX_VISUALS_PER_CHUNK {
        errors.push(format!(
            "visual count must be {MIN_VISUALS_PER_CHUNK}-{MAX_VISUALS_PER_CHUNK}"
        ));
    }
    if visuals.len() < example_count {
        errors.push("visual count must be >= number of examples".to_string());
    }

    let allowed_types: HashSet<&str> = VisualType::ALL.iter().map(VisualType::as_str).collect();
    let mut ids = HashSet::new();
    let mut anchor_coverage: HashSet<&str> = HashSet::new();

    for visual in visuals {
        let Some(id) = visual.get("id").and_then(Value::as_str).filter(|i| !i.is_empty()) else {
            errors.push("visual id missing".to_string());
            continue;
        };
        if !ids.insert(id) {
            errors.push("visual id must be unique".to_string());
        }

        match visual.get("type").and_then(Value::as_str) {
            Some(visual_type) if allowed_types.contains(visual_type) => {}
            _ => errors.push("visual type not allowed".to_string()),
        }

        match visual.get("anchor_quote").and_then(Value::as_str) {
            Some(quote) if !quote.is_empty() && transcript_chunk.contains(quote) => {
                anchor_coverage.insert(quote);
            }
            _ => errors.push("anchor_quote must be exact substring of transcript chunk".to_string()),
        }

        let title = visual.get("title").and_then(Value::as_str).unwrap_or("");
        if title.is_empty() {
            errors.push("visual title missing".to_string());
        }
        let caption = visual.get("caption").and_then(Value::as_str).unwrap_or("");
        if caption.is_empty() {
            errors.push("visual caption missing".to_string());
        } else if split_sentences(caption).len() > MAX_CAPTION_SENTENCES {
            errors.push(format!("visual caption must be 1-{MAX_CAPTION_SENTENCES} sentences"));
        }

        if ARRAY_POINTER_PHRASE.is_match(title) || ARRAY_POINTER_PHRASE.is_match(caption) {
            errors.push("array points to pointer phrasing detected".to_string());
        }

        if visual.get("type").and_then(Value::as_str) == Some("memory_diagram") {
            let content = visual.get("content").cloned().unwrap_or(Value::Null);
            let variables = variables_of(&content);
            let arrows = arrows_of(&content);
            validate_array_cells(&variables, &mut errors);
            validate_pointer_arrows(&variables, arrows.as_deref(), &mut errors);
        }
    }

    // Full coverage: every extracted anchor must be claimed by some visual,
    // not merely "some anchor matched".
    for anchor in anchors {
        if !anchor_coverage.contains(anchor.as_str()) {
            errors.push("anchor missing visual coverage".to_string());
        }
    }

    if !errors.is_empty() {
        tracing::debug!(violations = errors.len(), "visuals: batch rejected");
        return Err(errors);
    }

    serde_json::from_value::<Vec<lectern_core::models::visual::Visual>>(value.clone())
        .map(VisualsResult::Visuals)
        .map_err(|e| vec![format!("visuals failed to deserialize: {e}")])
}
