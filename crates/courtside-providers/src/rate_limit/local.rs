//! Local token bucket
//!
//! Identical refill math to the distributed realization, applied under the
//! per-key entry lock of a sharded map. There is no cross-process atomicity.

use async_trait::async_trait;
use courtside_domain::error::Result;
use courtside_domain::ports::TokenBucketBackend;
use courtside_domain::BucketState;
use dashmap::DashMap;

/// In-process token bucket table
///
/// Buckets are created full on first use and live for the lifetime of the
/// table.
#[derive(Debug, Default)]
pub struct LocalTokenBucket {
    buckets: DashMap<String, BucketState>,
}

impl LocalTokenBucket {
    /// Create an empty bucket table
    pub fn new() -> Self {
        Self::default()
    }

    /// Refill and take while holding the entry for `key`
    pub fn take(&self, key: &str, now: f64, rate: f64, amount: f64) -> bool {
        let mut bucket = self
            .buckets
            .entry(key.to_string())
            .or_insert_with(|| BucketState::full(rate, now));
        bucket.refill_and_take(now, rate, amount)
    }

    /// Current state of a bucket, if it has been created
    pub fn state(&self, key: &str) -> Option<BucketState> {
        self.buckets.get(key).map(|bucket| *bucket)
    }

    /// Number of buckets created so far
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Check if no bucket has been created yet
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[async_trait]
impl TokenBucketBackend for LocalTokenBucket {
    async fn try_acquire(&self, key: &str, now: f64, rate: f64, amount: f64) -> Result<bool> {
        Ok(self.take(key, now, rate, amount))
    }

    fn realization(&self) -> &str {
        "local"
    }
}
