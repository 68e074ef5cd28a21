//! Cache key derivation.
//!
//! Key formats are bit-exact contract:
//!
//! ```text
//! general = sha256(normalizedTopic | level | styleVersion)
//! tie_in  = sha256(courseId | topicContextHash | tieInVersion)
//! topicContextHash = sha256(normalizedTopic)
//! ```
//!
//! Deterministic prompt builders upstream are what make these keys
//! meaningful: the same triple always names the same content.

use sha2::{Digest, Sha256};

/// Normalize a topic for keying: lowercase, punctuation to spaces,
/// whitespace collapsed.
pub fn normalize_topic(topic: &str) -> String {
    let lowered = topic.to_lowercase();
    let replaced: String = lowered
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// sha256 hex digest of a key string.
pub fn hash_key(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

/// General-tier key for a `(normalizedTopic, level, styleVersion)` triple.
pub fn general_cache_key(normalized_topic: &str, level: &str, style_version: &str) -> String {
    hash_key(&format!("{normalized_topic}|{level}|{style_version}"))
}

/// Hash of the normalized topic context, used inside tie-in keys so a
/// change to the topic's underlying text rebuilds the tie-ins.
pub fn topic_context_hash(normalized_topic: &str) -> String {
    hash_key(normalized_topic)
}

/// Tie-in-tier key for a `(courseId, topicContextHash, tieInVersion)` triple.
pub fn tie_in_cache_key(course_id: &str, topic_context_hash: &str, tie_in_version: &str) -> String {
    hash_key(&format!("{course_id}|{topic_context_hash}|{tie_in_version}"))
}

/// User-tier composite key. Not hashed: the tuple is already bounded and
/// the key doubles as a readable trace label.
pub fn user_cache_key(user_id: &str, course_id: &str, topic_id: &str, level: &str) -> String {
    format!("{user_id}|{course_id}|{topic_id}|{level}")
}
