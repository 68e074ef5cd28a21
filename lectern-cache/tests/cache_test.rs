//! Key derivation and tier behavior tests.

use std::sync::Arc;

use chrono::Utc;

use lectern_cache::{
    general_cache_key, normalize_topic, tie_in_cache_key, topic_context_hash, user_cache_key,
    GeneralTier, ICacheStore, InMemoryStore,
};
use lectern_core::config::CacheConfig;
use lectern_core::models::cache_record::GeneralCacheRecord;
use lectern_core::models::lecture::{
    ConfusionMode, ContentSource, GeneralLectureContent, LectureChunk, LectureLevel,
};

fn sample_record(cache_key: &str) -> GeneralCacheRecord {
    GeneralCacheRecord {
        cache_key: cache_key.to_string(),
        topic_name: "Pointers".to_string(),
        normalized_topic: "pointers".to_string(),
        level: LectureLevel::Intro,
        style_version: "v1".to_string(),
        payload: GeneralLectureContent {
            chunks: vec![LectureChunk {
                chunk_title: "Intro".to_string(),
                narration: "Some narration.".to_string(),
                board_ops: None,
            }],
            confusion_mode: ConfusionMode {
                summary: "One idea.".to_string(),
                board_ops: None,
            },
            source: ContentSource::Stub,
            diagnostics: None,
        },
        created_at: Utc::now(),
    }
}

// ─── topic normalization ───

#[test]
fn normalize_topic_lowercases_and_collapses() {
    assert_eq!(normalize_topic("  Pointers & Arrays!! "), "pointers arrays");
    assert_eq!(normalize_topic("Big-O   Notation"), "big o notation");
}

// ─── key stability ───

#[test]
fn same_triple_same_key() {
    let a = general_cache_key("pointers", "intro", "v1");
    let b = general_cache_key("pointers", "intro", "v1");
    assert_eq!(a, b);
}

#[test]
fn style_version_bump_changes_the_key() {
    let v1 = general_cache_key("pointers", "intro", "v1");
    let v2 = general_cache_key("pointers", "intro", "v2");
    assert_ne!(v1, v2);
}

#[test]
fn level_changes_the_key() {
    let intro = general_cache_key("pointers", "intro", "v1");
    let deep = general_cache_key("pointers", "deep", "v1");
    assert_ne!(intro, deep);
}

#[test]
fn tie_in_key_tracks_topic_context() {
    let hash_a = topic_context_hash("pointers basics");
    let hash_b = topic_context_hash("pointers basics revised");
    assert_ne!(
        tie_in_cache_key("course-1", &hash_a, "v1"),
        tie_in_cache_key("course-1", &hash_b, "v1"),
    );
}

#[test]
fn keys_are_sha256_hex() {
    let key = general_cache_key("pointers", "intro", "v1");
    assert_eq!(key.len(), 64);
    assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn user_key_is_a_readable_composite() {
    assert_eq!(
        user_cache_key("u1", "c1", "t1", "intro"),
        "u1|c1|t1|intro"
    );
}

// ─── tiers ───

#[test]
fn tier_roundtrips_a_record() {
    let store = Arc::new(InMemoryStore::new());
    let tier = GeneralTier::new(store, &CacheConfig::default());

    let key = general_cache_key("pointers", "intro", "v1");
    assert!(tier.lookup(&key).is_none());

    tier.store(&key, &sample_record(&key));
    let fetched = tier.lookup(&key).expect("stored record");
    assert_eq!(fetched.topic_name, "Pointers");
}

#[test]
fn bypass_forces_misses_but_still_writes() {
    let store = Arc::new(InMemoryStore::new());
    let tier = GeneralTier::new(store.clone(), &CacheConfig { bypass: true });

    let key = general_cache_key("pointers", "intro", "v1");
    tier.store(&key, &sample_record(&key));
    assert!(tier.lookup(&key).is_none(), "bypass must force a miss");
    assert_eq!(store.len(), 1, "writes still land");
}

#[test]
fn corrupt_records_read_as_misses() {
    let store = Arc::new(InMemoryStore::new());
    let key = "corrupt";
    store.set(key, serde_json::json!({ "not": "a record" }));

    let tier = GeneralTier::new(store, &CacheConfig::default());
    assert!(tier.lookup(key).is_none());
}
