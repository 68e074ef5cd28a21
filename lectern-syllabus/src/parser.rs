//! Syllabus parsing pipeline.
//!
//! Structured extraction when the live backend is up, heuristic extraction
//! everywhere else. The caller always gets a `Syllabus` back; there is no
//! error path out of this module.

use base64::Engine;
use chrono::Datelike;

use lectern_core::models::syllabus::{
    GradingComponent, ScheduleEntry, Syllabus, SCHEDULE_ENTRY_LESSON,
};
use lectern_genai::{
    run_json_with_repair, GenerationBackend, GenerationRequest, PromptPart, RepairRequest,
    RequestKind,
};
use lectern_prompts::syllabus::{
    syllabus_repair_prompt, MINIMAL_SYLLABUS_SCHEMA, SYLLABUS_REPAIR_SYSTEM_INSTRUCTION,
    SYLLABUS_SYSTEM_INSTRUCTION,
};

use crate::heuristics::{extract_schedule_entries, normalize_date_string};
use crate::minimal::{validate_minimal_syllabus, MinimalSyllabus};

/// Parse an uploaded syllabus document into a full `Syllabus` record.
///
/// - Stub/disabled backend: heuristic extraction over the bytes as text.
/// - Live backend: one structured attempt plus one repair; both failing
///   validation triggers heuristic salvage. Transport failure falls back
///   to the heuristic entirely.
pub async fn parse_syllabus_from_bytes(
    backend: &GenerationBackend,
    model: &str,
    bytes: &[u8],
    mime_type: &str,
) -> Syllabus {
    let default_year = chrono::Utc::now().year();

    if !backend.is_live() {
        tracing::info!("syllabus: backend disabled, using heuristic extraction");
        return heuristic_syllabus(bytes, default_year);
    }

    let request = GenerationRequest {
        model: model.to_string(),
        system_instruction: SYLLABUS_SYSTEM_INSTRUCTION.to_string(),
        parts: vec![
            PromptPart::Text(MINIMAL_SYLLABUS_SCHEMA.to_string()),
            PromptPart::InlineData {
                mime_type: mime_type.to_string(),
                data_base64: base64::engine::general_purpose::STANDARD.encode(bytes),
            },
        ],
        temperature: 0.1,
        max_output_tokens: 512,
        structured_json: true,
        kind: RequestKind::Syllabus,
    };

    let spec = RepairRequest {
        primary: request,
        repair_system_instruction: SYLLABUS_REPAIR_SYSTEM_INSTRUCTION,
        build_repair_prompt: &syllabus_repair_prompt,
    };

    match run_json_with_repair(backend, spec, &mut validate_minimal_syllabus).await {
        Ok(outcome) => match outcome.result {
            Some(minimal) => {
                tracing::info!(repaired = outcome.repaired, "syllabus: structured extraction ok");
                expand_minimal(minimal, default_year)
            }
            None => {
                // Two consecutive structured attempts failed validation.
                tracing::warn!("syllabus: structured extraction failed twice, salvaging");
                heuristic_syllabus(bytes, default_year)
            }
        },
        Err(e) => {
            tracing::warn!("syllabus: backend unreachable ({e}), using heuristic extraction");
            heuristic_syllabus(bytes, default_year)
        }
    }
}

/// Expand the minimal extraction into the full record the calling layer
/// expects, filling everything not extracted with null/[] defaults.
fn expand_minimal(minimal: MinimalSyllabus, default_year: i32) -> Syllabus {
    Syllabus {
        course_code: minimal.course_code,
        course_title: minimal.course_title,
        grading_breakdown: minimal
            .grading_breakdown
            .into_iter()
            .map(|row| GradingComponent {
                component: row.component,
                weight_percent: row.weight_percent,
            })
            .collect(),
        schedule_entries: minimal
            .schedule_entries
            .into_iter()
            .map(|row| ScheduleEntry {
                date: row
                    .date
                    .as_deref()
                    .and_then(|raw| normalize_date_string(raw, default_year)),
                title: row.title,
                entry_type: SCHEDULE_ENTRY_LESSON.to_string(),
                details: None,
            })
            .collect(),
        ..Syllabus::default()
    }
}

fn heuristic_syllabus(bytes: &[u8], default_year: i32) -> Syllabus {
    let text = String::from_utf8_lossy(bytes);
    let schedule_entries = extract_schedule_entries(&text, default_year);
    tracing::info!(entries = schedule_entries.len(), "syllabus: heuristic extraction");
    Syllabus {
        schedule_entries,
        ..Syllabus::default()
    }
}
