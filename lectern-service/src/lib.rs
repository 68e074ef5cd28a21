//! # lectern-service
//!
//! The operations exposed to the calling layer. Each one runs the full
//! generate → validate → repair cycle against the injected backend and
//! guarantees a well-formed result: the worst case is a clearly-tagged
//! stub or an explicit clarification request, never a malformed payload
//! and never a propagated parse error.

pub mod engine;

pub use engine::{ordering_label, LectureService, TopicRef};
