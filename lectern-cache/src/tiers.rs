//! The three tier wrappers: typed lookup/store over an `ICacheStore`.
//!
//! Lookups are best-effort: a corrupt record logs and reads as a miss,
//! which forces an idempotent regeneration instead of an error.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use lectern_core::config::CacheConfig;
use lectern_core::errors::CacheError;
use lectern_core::models::cache_record::{GeneralCacheRecord, TieInCacheRecord, UserCacheRecord};

fn read_record<T: DeserializeOwned>(tier: &str, key: &str, value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(e) => {
            let err = CacheError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            };
            tracing::warn!(tier, "cache: {err}, treating as miss");
            None
        }
    }
}

fn write_record<T: Serialize>(store: &dyn super::ICacheStore, tier: &str, key: &str, record: &T) {
    match serde_json::to_value(record) {
        Ok(value) => store.set(key, value),
        Err(e) => tracing::warn!(tier, key, "cache: record failed to serialize, skipping: {e}"),
    }
}

macro_rules! tier {
    ($name:ident, $record:ty, $label:literal) => {
        /// Typed wrapper over one cache tier.
        #[derive(Clone)]
        pub struct $name {
            store: Arc<dyn super::ICacheStore>,
            bypass: bool,
        }

        impl $name {
            pub fn new(store: Arc<dyn super::ICacheStore>, config: &CacheConfig) -> Self {
                Self {
                    store,
                    bypass: config.bypass,
                }
            }

            /// Fetch a record, or `None` on miss, bypass, or corruption.
            pub fn lookup(&self, key: &str) -> Option<$record> {
                if self.bypass {
                    tracing::debug!(key, concat!("cache: ", $label, " bypass"));
                    return None;
                }
                let value = self.store.get(key)?;
                let record = read_record::<$record>($label, key, value);
                if record.is_some() {
                    tracing::debug!(key, concat!("cache: ", $label, " hit"));
                }
                record
            }

            /// Upsert a record. Last write wins; writes are idempotent per
            /// key, so racing misses are harmless.
            pub fn store(&self, key: &str, record: &$record) {
                write_record(self.store.as_ref(), $label, key, record);
            }
        }
    };
}

tier!(GeneralTier, GeneralCacheRecord, "general");
tier!(TieInTier, TieInCacheRecord, "tie_in");
tier!(UserTier, UserCacheRecord, "user");
