//! # lectern-genai
//!
//! Everything that talks to the generative text backend: the request
//! types, the live HTTP client and its deterministic stub twin, raw-output
//! sanitation, and the generate → validate → repair-once orchestrator.
//!
//! The backend is treated as an opaque call with latency and failure modes.
//! Transport errors propagate; malformed responses never do — they flow
//! through the repair cascade and come back as `None` for the caller's
//! fallback handling.

pub mod client;
pub mod repair;
pub mod sanitize;
pub mod stub;

pub use client::{
    GeminiClient, GenerationBackend, GenerationRequest, PromptPart, RequestKind, StubBackend,
};
pub use repair::{run_json_with_repair, RepairOutcome, RepairRequest};
pub use sanitize::sanitize_json;
