//! Typed records stored in the three cache tiers.
//!
//! Each tier owns disjoint information: narration lives only in the general
//! tier, tie-in sentences only in the tie-in tier, and the user tier holds
//! the assembled package plus the version stamps that let visuals and
//! whiteboard content be regenerated without touching the narration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lecture::{GeneralLectureContent, LectureLevel, LecturePackage};

/// General-tier record: style-general content, shared across every course
/// and user teaching the same topic at the same level. Immutable per key;
/// a version bump produces a new key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralCacheRecord {
    pub cache_key: String,
    pub topic_name: String,
    pub normalized_topic: String,
    pub level: LectureLevel,
    pub style_version: String,
    pub payload: GeneralLectureContent,
    pub created_at: DateTime<Utc>,
}

/// Tie-in-tier record: the short course-specific connective sentences,
/// one per lecture chunk. Never holds general narration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieInCacheRecord {
    pub cache_key: String,
    pub course_id: String,
    pub topic_id: String,
    pub topic_context_hash: String,
    pub tie_in_version: String,
    pub tie_ins: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// User-tier record: the fully assembled package for one
/// (user, course, topic, level), with independent version stamps so each
/// generated field can go stale on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCacheRecord {
    pub user_id: String,
    pub course_id: String,
    pub topic_id: String,
    pub level: LectureLevel,
    pub general_cache_key: String,
    pub tie_in_cache_key: String,
    pub visuals_version: String,
    pub whiteboard_version: String,
    pub package: LecturePackage,
    pub updated_at: DateTime<Utc>,
}
