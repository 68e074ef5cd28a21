//! Deterministic stub content.
//!
//! Used two ways: as the payload source for the stub backend, and as the
//! substitute the service layer reaches for when the live backend fails in
//! transport or exhausts its repair attempt. Every builder here satisfies
//! the corresponding validator's floors, so stub output flows through the
//! same pipeline as real output.

use lectern_core::constants::{MIN_CHUNK_WORDS, MIN_LECTURE_CHUNKS, MIN_TOTAL_WORDS};
use lectern_core::errors::GenAiError;
use lectern_core::models::lecture::{
    ConfusionMode, ContentSource, Diagnostics, GeneralLectureContent, LectureChunk, LectureLevel,
    LectureQuestionAnswer, WhiteboardOp,
};
use lectern_core::models::visual::NeedsClarification;

use crate::client::RequestKind;

/// Chunk angles for the stub lecture, in teaching order.
const CHUNK_ANGLES: [&str; 8] = [
    "The core intuition",
    "A concrete example",
    "The mechanism underneath",
    "Where it shows up",
    "A common mistake",
    "Working through it step by step",
    "Connecting it back",
    "A quick recap",
];

/// Sentence templates cycled until the narration clears its word floor.
const NARRATION_SENTENCES: [&str; 12] = [
    "Let's take {topic} slowly and keep one picture in front of us the whole time.",
    "Before any formal definition, notice what problem {topic} is actually solving.",
    "Under the angle of {angle}, the idea stays the same even when the notation changes.",
    "Try restating {topic} in your own words; if the restatement is short, you have it.",
    "Most of the difficulty with {topic} is vocabulary, not the idea itself.",
    "Walk through the smallest case you can write down, then grow it by one step.",
    "When something feels abstract, anchor it to the concrete case we just built.",
    "Nothing new is being introduced here; we are looking at the same idea from {angle}.",
    "If you can predict the next step before reading it, the mechanism has landed.",
    "Keep asking what changed between this step and the previous one for {topic}.",
    "A wrong guess followed by a correction teaches more than a passive read-through.",
    "Hold on to the one-sentence version of {topic}; every detail hangs off of it.",
];

fn stub_narration(topic_name: &str, angle: &str, minimum_words: usize) -> String {
    let mut narration = String::new();
    let mut words = 0;
    while words < minimum_words {
        for template in NARRATION_SENTENCES {
            let sentence = template
                .replace("{topic}", topic_name)
                .replace("{angle}", angle.to_lowercase().as_str());
            if !narration.is_empty() {
                narration.push(' ');
            }
            narration.push_str(&sentence);
            words = narration.split_whitespace().count();
            if words >= minimum_words {
                break;
            }
        }
    }
    narration
}

/// Deterministic lecture satisfying every general-lecture floor.
pub fn stub_lecture(
    topic_name: &str,
    level: LectureLevel,
    source: ContentSource,
) -> GeneralLectureContent {
    // Per-chunk target that also clears the aggregate floor across all chunks.
    let chunk_word_target = MIN_CHUNK_WORDS.max(MIN_TOTAL_WORDS / MIN_LECTURE_CHUNKS) + 8;

    let chunks: Vec<LectureChunk> = CHUNK_ANGLES
        .iter()
        .enumerate()
        .take(MIN_LECTURE_CHUNKS)
        .map(|(index, angle)| {
            let board_ops = if index == 0 {
                vec![
                    WhiteboardOp::Rect {
                        x: 24.0,
                        y: 20.0,
                        w: 120.0,
                        h: 50.0,
                        label: Some("idea".to_string()),
                    },
                    WhiteboardOp::Arrow {
                        from: [144.0, 45.0],
                        to: [200.0, 45.0],
                        label: Some("link".to_string()),
                    },
                ]
            } else {
                vec![WhiteboardOp::Text {
                    x: 22.0,
                    y: 90.0,
                    text: angle.to_string(),
                }]
            };
            LectureChunk {
                chunk_title: format!("{angle} ({})", level.as_str()),
                narration: stub_narration(topic_name, angle, chunk_word_target),
                board_ops: Some(board_ops),
            }
        })
        .collect();

    let total_word_count = chunks
        .iter()
        .map(|c| c.narration.split_whitespace().count())
        .sum();

    GeneralLectureContent {
        chunks,
        confusion_mode: ConfusionMode {
            summary: format!(
                "{topic_name} comes down to one idea; every example in this lecture is that \
                 same idea seen from a different angle."
            ),
            board_ops: Some(vec![WhiteboardOp::Text {
                x: 18.0,
                y: 20.0,
                text: "one core idea".to_string(),
            }]),
        },
        source,
        diagnostics: Some(Diagnostics {
            total_word_count: Some(total_word_count),
            repaired: None,
        }),
    }
}

/// Deterministic tie-ins, one per chunk.
pub fn stub_tie_ins(
    course_name: &str,
    topic_name: &str,
    topic_ordering: &str,
    chunk_count: usize,
) -> Vec<String> {
    (0..chunk_count)
        .map(|_| format!("{topic_name} connects to {course_name} ({topic_ordering})."))
        .collect()
}

/// Deterministic short answer.
pub fn stub_answer(topic_name: &str, question: &str) -> LectureQuestionAnswer {
    let trimmed: String = question.trim().chars().take(120).collect();
    let answer = if trimmed.is_empty() {
        format!("Short answer on {topic_name}: focus on the one core idea first.")
    } else {
        format!("Short answer on {topic_name}: {trimmed}.")
    };
    LectureQuestionAnswer {
        answer,
        board_ops: Some(vec![WhiteboardOp::Text {
            x: 16.0,
            y: 20.0,
            text: "short answer".to_string(),
        }]),
    }
}

/// Clarification payload used when visuals cannot be produced.
pub fn stub_visuals_clarification() -> NeedsClarification {
    NeedsClarification::new(
        "backend_disabled",
        vec!["Enable the live generation backend to generate visuals.".to_string()],
    )
}

/// Raw JSON for the stub backend, matching the wire contract each request
/// kind is validated against.
pub fn stub_raw_json(kind: &RequestKind) -> Result<String, GenAiError> {
    let encode = |value: serde_json::Value| value.to_string();

    match kind {
        RequestKind::Lecture { topic_name, level } => {
            let lecture = stub_lecture(topic_name, *level, ContentSource::Stub);
            serde_json::to_string(&lecture).map_err(|e| GenAiError::Encode {
                reason: e.to_string(),
            })
        }
        RequestKind::TieIns {
            course_name,
            topic_name,
            chunk_count,
        } => {
            let tie_ins = stub_tie_ins(course_name, topic_name, "ordering unknown", *chunk_count);
            Ok(encode(serde_json::json!({ "tieIns": tie_ins })))
        }
        RequestKind::Question { topic_name } => {
            let answer = stub_answer(topic_name, "");
            serde_json::to_string(&answer).map_err(|e| GenAiError::Encode {
                reason: e.to_string(),
            })
        }
        RequestKind::Visuals => {
            serde_json::to_string(&stub_visuals_clarification()).map_err(|e| GenAiError::Encode {
                reason: e.to_string(),
            })
        }
        RequestKind::Syllabus => Ok(encode(serde_json::json!({
            "course_code": null,
            "course_title": null,
            "grading_breakdown": [],
            "schedule_entries": [],
        }))),
    }
}
