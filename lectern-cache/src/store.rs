//! The key-value store a tier sits on.

use dashmap::DashMap;
use serde_json::Value;

/// Key-value record store backing a cache tier. External stores (Redis,
/// a database table) implement this; `InMemoryStore` is the built-in.
pub trait ICacheStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, record: Value);
}

/// DashMap-backed store.
///
/// No TTL and no eviction. That is a known gap carried over deliberately:
/// whether this store is dev-only or production-safe is unresolved, so the
/// behavior is documented rather than silently changed.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: DashMap<String, Value>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ICacheStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, record: Value) {
        self.entries.insert(key.to_string(), record);
    }
}
