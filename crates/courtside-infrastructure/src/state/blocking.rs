//! Synchronous facade
//!
//! Drives the async cache, rate limiter and invalidation on a runtime handle,
//! so synchronous write paths (model registry) and async readers share one
//! fallback store and one set of bucket tables.

use crate::cache::CacheStore;
use crate::invalidation::{InvalidationBroadcaster, PurgeReport};
use crate::rate_limit::TokenBucket;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::runtime::Handle;

/// Blocking view of an [`EphemeralState`](crate::state::EphemeralState)
///
/// Every method blocks the calling thread until the underlying async
/// operation completes. Calling it from inside an async context panics.
#[derive(Debug, Clone)]
pub struct BlockingEphemeralState {
    handle: Handle,
    cache: CacheStore,
    rate_limiter: TokenBucket,
    invalidation: InvalidationBroadcaster,
}

impl BlockingEphemeralState {
    pub(crate) fn new(
        handle: Handle,
        cache: CacheStore,
        rate_limiter: TokenBucket,
        invalidation: InvalidationBroadcaster,
    ) -> Self {
        Self {
            handle,
            cache,
            rate_limiter,
            invalidation,
        }
    }

    /// See [`CacheStore::get`]
    pub fn get(&self, key: &str) -> Option<String> {
        self.handle.block_on(self.cache.get(key))
    }

    /// See [`CacheStore::get_as`]
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.handle.block_on(self.cache.get_as(key))
    }

    /// See [`CacheStore::set`]
    pub fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> bool {
        self.handle.block_on(self.cache.set(key, value, ttl))
    }

    /// See [`CacheStore::set_as`]
    pub fn set_as<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> bool {
        self.handle.block_on(self.cache.set_as(key, value, ttl))
    }

    /// See [`CacheStore::delete`]
    pub fn delete(&self, key: &str) -> bool {
        self.handle.block_on(self.cache.delete(key))
    }

    /// See [`CacheStore::delete_prefix`]
    pub fn delete_prefix(&self, prefix: &str) -> usize {
        self.handle.block_on(self.cache.delete_prefix(prefix))
    }

    /// See [`TokenBucket::acquire`]
    pub fn acquire(&self, key: &str, amount: u32, timeout: Duration) -> bool {
        self.handle
            .block_on(self.rate_limiter.acquire(key, amount, timeout))
    }

    /// See [`InvalidationBroadcaster::purge`]
    pub fn purge<I, S>(&self, prefixes: I) -> PurgeReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.handle.block_on(self.invalidation.purge(prefixes))
    }

    /// See [`InvalidationBroadcaster::purge_model_artifact`]
    pub fn purge_model_artifact(&self, model_id: &str) -> PurgeReport {
        self.handle
            .block_on(self.invalidation.purge_model_artifact(model_id))
    }
}
