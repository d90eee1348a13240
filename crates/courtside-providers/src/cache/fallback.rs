//! In-process fallback store
//!
//! Sharded concurrent map from key to [`CacheEntry`], used whenever the
//! remote backend is absent or failing.
//!
//! ## Features
//!
//! - Lazy expiry: an expired entry is treated as absent and removed when read
//! - Prefix deletion that reports exactly which live keys it removed
//! - Explicit sweep of expired entries with [`FallbackStore::purge_expired`]
//!
//! All methods are synchronous and never hold a shard lock across an
//! `.await`, so blocking and async call sites can share one instance.

use courtside_domain::CacheEntry;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Concurrent in-memory TTL cache
#[derive(Debug, Default)]
pub struct FallbackStore {
    entries: DashMap<String, CacheEntry>,
}

impl FallbackStore {
    /// Create an empty fallback store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a live value, removing it if it has expired
    pub fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => return Some(entry.value.clone()),
            Some(_) => {}
            None => return None,
        }
        // The shard guard is released here; the entry may have been rewritten since.
        self.entries
            .remove_if(key, |_, entry| entry.is_expired_at(now));
        None
    }

    /// Insert or overwrite a value; `None` or zero `ttl` never expires
    pub fn set(&self, key: &str, value: &str, ttl: Option<Duration>) {
        let entry = CacheEntry::created_at(value, ttl, Instant::now());
        self.entries.insert(key.to_string(), entry);
    }

    /// Remove a key
    ///
    /// # Returns
    /// True if a live entry was removed
    pub fn delete(&self, key: &str) -> bool {
        self.entries
            .remove(key)
            .is_some_and(|(_, entry)| !entry.is_expired())
    }

    /// Remove every key starting with `prefix`
    ///
    /// # Returns
    /// Keys of the live entries removed
    pub fn delete_prefix(&self, prefix: &str) -> Vec<String> {
        let now = Instant::now();
        let mut removed = Vec::new();
        self.entries.retain(|key, entry| {
            if !key.starts_with(prefix) {
                return true;
            }
            if !entry.is_expired_at(now) {
                removed.push(key.clone());
            }
            false
        });
        removed
    }

    /// Physically remove expired entries
    ///
    /// # Returns
    /// Number of entries removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut purged = 0;
        self.entries.retain(|_, entry| {
            let expired = entry.is_expired_at(now);
            if expired {
                purged += 1;
            }
            !expired
        });
        if purged > 0 {
            debug!(purged = purged, "Swept expired fallback entries");
        }
        purged
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(|entry| !entry.is_expired_at(now))
            .count()
    }

    /// Check if the store holds no live entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.entries.clear();
    }
}
