//! # lectern-syllabus
//!
//! Turns an uploaded syllabus document into a `Syllabus` record. The
//! structured path asks the generative backend for a minimal schema and
//! runs it through the repair cascade; the heuristic path regex-scans the
//! raw text for dated lesson lines. The heuristic serves twice: as the
//! complete fallback when the backend is unavailable, and as salvage when
//! two consecutive structured attempts both fail validation.

pub mod heuristics;
pub mod minimal;
pub mod parser;

pub use heuristics::{extract_schedule_entries, normalize_date_string};
pub use minimal::{validate_minimal_syllabus, MinimalSyllabus};
pub use parser::parse_syllabus_from_bytes;
