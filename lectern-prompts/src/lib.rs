//! # lectern-prompts
//!
//! Deterministic prompt builders. Every function here is pure and
//! referentially transparent: identical inputs yield byte-identical
//! prompts, which is what makes general-tier cache keys meaningful.

pub mod lecture;
pub mod syllabus;
pub mod visuals;
