//! Cache store
//!
//! Remote-first reads and writes with the fallback policy:
//!
//! | Operation | Remote connected and healthy | Remote failing or absent |
//! |-----------|------------------------------|--------------------------|
//! | `get` | remote only (a miss is final) | fallback |
//! | `set` | remote, and any fallback copy is dropped | fallback |
//! | `delete` | remote and fallback | fallback |
//! | `delete_prefix` | remote scan and fallback filter | fallback filter |
//!
//! A key therefore has at most one live value: a remote write discards the
//! copy left by an earlier outage instead of letting it resurface in the next.

use crate::cache::{BackendMode, CacheMetrics, RemoteHandle};
use crate::config::CacheConfig;
use crate::error_ext::ErrorContext;
use crate::logging::log_remote_fallback;
use courtside_domain::CacheCounter;
use courtside_domain::error::Result;
use courtside_domain::ports::{RemoteBackend, prefix_pattern};
use courtside_providers::cache::FallbackStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Dual-backend cache
///
/// Cloning is cheap; clones share backends and counters.
#[derive(Debug, Clone)]
pub struct CacheStore {
    remote: RemoteHandle,
    fallback: Arc<FallbackStore>,
    metrics: Arc<CacheMetrics>,
    default_ttl: Duration,
    scan_batch_size: usize,
}

impl CacheStore {
    /// Create a cache over the given backends
    pub fn new(
        remote: RemoteHandle,
        fallback: Arc<FallbackStore>,
        metrics: Arc<CacheMetrics>,
        config: &CacheConfig,
    ) -> Self {
        Self {
            remote,
            fallback,
            metrics,
            default_ttl: config.default_ttl(),
            scan_batch_size: config.scan_batch_size.max(1),
        }
    }

    /// Get a payload
    ///
    /// Exactly one of `hits` / `misses` is incremented per call.
    pub async fn get(&self, key: &str) -> Option<String> {
        let value = match self.remote.backend() {
            Some(remote) => match remote.get(key).await {
                Ok(value) => value,
                Err(e) => {
                    log_remote_fallback("get", key, &e);
                    self.fallback.get(key)
                }
            },
            None => self.fallback.get(key),
        };
        self.record_lookup(value.is_some());
        value
    }

    /// Get and decode a JSON payload
    ///
    /// A remote payload that does not decode as `T` is treated like any other
    /// remote failure and the fallback is consulted. A fallback payload that
    /// does not decode counts as a miss.
    pub async fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = match self.remote.backend() {
            Some(remote) => match Self::get_remote_as(remote.as_ref(), key).await {
                Ok(value) => value,
                Err(e) => {
                    log_remote_fallback("get", key, &e);
                    self.get_fallback_as(key)
                }
            },
            None => self.get_fallback_as(key),
        };
        self.record_lookup(value.is_some());
        value
    }

    /// Store a payload; `None` or a zero `ttl` never expires
    ///
    /// Writes go to exactly one backend: the remote when it accepts the
    /// write, otherwise the fallback. A remote write also removes the
    /// fallback copy of `key`.
    pub async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> bool {
        let ttl = ttl.filter(|ttl| !ttl.is_zero());
        if let Some(remote) = self.remote.backend() {
            match remote.set(key, value, ttl).await {
                Ok(()) => {
                    self.fallback.delete(key);
                    self.metrics.increment(CacheCounter::Sets);
                    return true;
                }
                Err(e) => log_remote_fallback("set", key, &e),
            }
        }
        self.fallback.set(key, value, ttl);
        self.metrics.increment(CacheCounter::Sets);
        true
    }

    /// Serialize `value` as JSON and store it
    ///
    /// # Returns
    /// False only when `value` cannot be serialized
    pub async fn set_as<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> bool {
        match serde_json::to_string(value) {
            Ok(payload) => self.set(key, &payload, ttl).await,
            Err(e) => {
                warn!(key = key, error = %e, "Failed to serialize cache value");
                false
            }
        }
    }

    /// Store a payload with the configured default TTL
    pub async fn set_default(&self, key: &str, value: &str) -> bool {
        self.set(key, value, Some(self.default_ttl)).await
    }

    /// Remove a key from both backends
    ///
    /// # Returns
    /// True if either backend held the key
    pub async fn delete(&self, key: &str) -> bool {
        let remote_removed = match self.remote.backend() {
            Some(remote) => match remote.delete(key).await {
                Ok(removed) => removed,
                Err(e) => {
                    log_remote_fallback("delete", key, &e);
                    false
                }
            },
            None => false,
        };
        let fallback_removed = self.fallback.delete(key);

        let removed = remote_removed || fallback_removed;
        if removed {
            self.metrics.increment(CacheCounter::Deletes);
        }
        removed
    }

    /// Remove every key starting with `prefix` from both backends
    ///
    /// An empty prefix is refused and removes nothing.
    ///
    /// # Returns
    /// Number of distinct keys removed; a key held by both backends counts once
    pub async fn delete_prefix(&self, prefix: &str) -> usize {
        if prefix.is_empty() {
            warn!("Refusing to delete an empty prefix");
            return 0;
        }

        let (remote_removed, remote_keys) = match self.remote.backend() {
            Some(remote) => self.delete_remote_prefix(remote.as_ref(), prefix).await,
            None => (0, HashSet::new()),
        };
        let fallback_keys = self.fallback.delete_prefix(prefix);
        let fallback_removed = fallback_keys
            .iter()
            .filter(|key| !remote_keys.contains(key.as_str()))
            .count();

        let removed = remote_removed + fallback_removed;
        self.metrics.add(CacheCounter::Deletes, removed as u64);
        debug!(
            prefix = prefix,
            remote = remote_removed,
            fallback = fallback_removed,
            "Deleted keys by prefix"
        );
        removed
    }

    /// Which backend reads and writes prefer
    pub fn backend_mode(&self) -> BackendMode {
        self.remote.mode()
    }

    /// Shared counters
    pub fn metrics(&self) -> &Arc<CacheMetrics> {
        &self.metrics
    }

    /// Shared fallback store
    pub fn fallback(&self) -> &Arc<FallbackStore> {
        &self.fallback
    }

    /// Remote handle this cache was built with
    pub fn remote(&self) -> &RemoteHandle {
        &self.remote
    }

    fn record_lookup(&self, hit: bool) {
        if hit {
            self.metrics.increment(CacheCounter::Hits);
        } else {
            self.metrics.increment(CacheCounter::Misses);
        }
    }

    async fn get_remote_as<T: DeserializeOwned>(
        remote: &dyn RemoteBackend,
        key: &str,
    ) -> Result<Option<T>> {
        match remote.get(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .decode_context(format!("Cached value for {} is not valid JSON", key)),
            None => Ok(None),
        }
    }

    fn get_fallback_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.fallback.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = key, error = %e, "Fallback cache value is not valid JSON");
                None
            }
        }
    }

    // SCAN and DEL page by page; keys removed before a failure still count.
    // Returns the DEL count and the keys of every page that was deleted.
    async fn delete_remote_prefix(
        &self,
        remote: &dyn RemoteBackend,
        prefix: &str,
    ) -> (usize, HashSet<String>) {
        let pattern = prefix_pattern(prefix);
        let mut cursor = 0;
        let mut removed = 0;
        let mut keys = HashSet::new();

        loop {
            let page = match remote.scan(cursor, &pattern, self.scan_batch_size).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(
                        prefix = prefix,
                        removed = removed,
                        kind = e.kind(),
                        error = %e,
                        "Remote prefix scan failed"
                    );
                    return (removed, keys);
                }
            };

            if !page.keys.is_empty() {
                match remote.delete_many(&page.keys).await {
                    Ok(count) => {
                        removed += count;
                        keys.extend(page.keys.iter().cloned());
                    }
                    Err(e) => {
                        warn!(
                            prefix = prefix,
                            removed = removed,
                            kind = e.kind(),
                            error = %e,
                            "Remote prefix delete failed"
                        );
                        return (removed, keys);
                    }
                }
            }

            if page.is_last() {
                return (removed, keys);
            }
            cursor = page.cursor;
        }
    }
}
