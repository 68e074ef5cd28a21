//! # lectern-core
//!
//! Foundation crate for the Lectern teaching-content pipeline.
//! Defines all shared types, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;

// Re-export the most commonly used types at the crate root.
pub use config::{BackendMode, CacheConfig, GenAiConfig};
pub use errors::{LecternError, LecternResult};
pub use models::lecture::{
    ContentSource, GeneralLectureContent, LectureChunk, LectureLevel, LecturePackage,
    LectureQuestionAnswer, WhiteboardOp,
};
pub use models::visual::{NeedsClarification, Visual, VisualType, VisualsResult};
