//! # lectern-cache
//!
//! The three cache tiers that make generated content reusable:
//!
//! - **General** — style-general lecture content, shared by every course
//!   and user teaching the same topic at the same level.
//! - **Tie-in** — short course-specific connective sentences.
//! - **User** — the fully assembled package, with independent version
//!   stamps for visuals and whiteboard content.
//!
//! Tiers never duplicate each other's facts. Access is check-then-write
//! with no locking: concurrent misses may redundantly regenerate, which is
//! acceptable because writes are idempotent per key.

pub mod keys;
pub mod store;
pub mod tiers;

pub use keys::{
    general_cache_key, hash_key, normalize_topic, tie_in_cache_key, topic_context_hash,
    user_cache_key,
};
pub use store::{ICacheStore, InMemoryStore};
pub use tiers::{GeneralTier, TieInTier, UserTier};
