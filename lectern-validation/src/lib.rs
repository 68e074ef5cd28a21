//! # lectern-validation
//!
//! Structural and semantic validators for generated content, one per
//! content type. All share the same posture: reject unexpected envelopes,
//! reject unknown keys against explicit allow-lists (over-permissive
//! generation drifts), and enforce quantitative floors.
//!
//! Validators consume a parsed `serde_json::Value` and return either the
//! normalized typed payload or a list of violated rules. The error strings
//! are part of the contract: they are embedded verbatim in repair prompts
//! so the model can target the specific rule it broke.

pub mod lecture;
pub mod text;
pub mod visuals;

pub use lecture::{validate_answer, validate_general_lecture, validate_tie_ins};
pub use visuals::anchors::{extract_visual_anchors, AnchorSet};
pub use visuals::domains::{detect_domains, DomainDetection, DomainScore};
pub use visuals::normalize::normalize_visual_output;
pub use visuals::validator::validate_visual_output;
