//! Lecture content types shared across generation, validation, and caching.
//!
//! Field names follow the wire contract the generative backend is prompted
//! with (camelCase), so these types round-trip the validated JSON directly.

use serde::{Deserialize, Serialize};

/// A single whiteboard drawing command, discriminated by `op`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum WhiteboardOp {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Circle {
        x: f64,
        y: f64,
        r: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Arrow {
        from: [f64; 2],
        to: [f64; 2],
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
    },
    Erase {
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },
}

/// Depth the learner asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LectureLevel {
    #[default]
    Intro,
    Exam,
    Deep,
}

impl LectureLevel {
    /// Stable token used in cache keys and prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            LectureLevel::Intro => "intro",
            LectureLevel::Exam => "exam",
            LectureLevel::Deep => "deep",
        }
    }

    /// Parse a level token, defaulting to `Intro` for anything unknown.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "exam" => LectureLevel::Exam,
            "deep" => LectureLevel::Deep,
            _ => LectureLevel::Intro,
        }
    }
}

/// Who produced a piece of content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    /// The live generative backend.
    #[default]
    Gemini,
    /// The deterministic stub backend (backend disabled by config).
    Stub,
    /// The stub, substituted after a transport or repair failure.
    StubFallback,
}

/// One narration chunk of a general lecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LectureChunk {
    #[serde(rename = "chunkTitle")]
    pub chunk_title: String,
    pub narration: String,
    #[serde(rename = "boardOps", skip_serializing_if = "Option::is_none")]
    pub board_ops: Option<Vec<WhiteboardOp>>,
}

/// Single-idea restatement used to re-anchor a confused learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMode {
    pub summary: String,
    #[serde(rename = "boardOps", skip_serializing_if = "Option::is_none")]
    pub board_ops: Option<Vec<WhiteboardOp>>,
}

/// Producer-side diagnostics attached to generated lectures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    #[serde(rename = "totalWordCount", skip_serializing_if = "Option::is_none")]
    pub total_word_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repaired: Option<bool>,
}

/// Course-agnostic lecture content, shared across every course and user
/// that teaches the same topic at the same level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralLectureContent {
    pub chunks: Vec<LectureChunk>,
    #[serde(rename = "confusionMode")]
    pub confusion_mode: ConfusionMode,
    #[serde(default)]
    pub source: ContentSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

/// A chunk as assembled into a per-user package: general narration plus the
/// course-specific tie-in sentence for that position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageChunk {
    #[serde(rename = "chunkTitle")]
    pub chunk_title: String,
    pub narration: String,
    #[serde(rename = "tieIn", skip_serializing_if = "Option::is_none")]
    pub tie_in: Option<String>,
    #[serde(rename = "boardOps", skip_serializing_if = "Option::is_none")]
    pub board_ops: Option<Vec<WhiteboardOp>>,
}

/// The fully assembled lecture for one (user, course, topic, level).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LecturePackage {
    #[serde(rename = "topicId")]
    pub topic_id: String,
    pub level: LectureLevel,
    pub chunks: Vec<PackageChunk>,
    #[serde(rename = "confusionMode")]
    pub confusion_mode: ConfusionMode,
    /// One visuals result per chunk, aligned by index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visuals: Option<Vec<super::visual::VisualsResult>>,
    pub source: ContentSource,
}

/// Compact answer to a learner question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LectureQuestionAnswer {
    pub answer: String,
    #[serde(rename = "boardOps", skip_serializing_if = "Option::is_none")]
    pub board_ops: Option<Vec<WhiteboardOp>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_round_trip_their_tokens() {
        for level in [LectureLevel::Intro, LectureLevel::Exam, LectureLevel::Deep] {
            assert_eq!(LectureLevel::parse_or_default(level.as_str()), level);
        }
        assert_eq!(LectureLevel::parse_or_default("gibberish"), LectureLevel::Intro);
    }

    #[test]
    fn board_ops_discriminate_on_op() {
        let op: WhiteboardOp =
            serde_json::from_value(serde_json::json!({ "op": "rect", "x": 1.0, "y": 2.0, "w": 3.0, "h": 4.0 }))
                .expect("tagged rect");
        assert!(matches!(op, WhiteboardOp::Rect { .. }));

        let unknown = serde_json::from_value::<WhiteboardOp>(serde_json::json!({ "op": "hologram" }));
        assert!(unknown.is_err());
    }
}
