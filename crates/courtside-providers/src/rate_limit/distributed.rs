//! Distributed token bucket
//!
//! Delegates the check-and-set to the remote backend's atomic script so that
//! every instance draws from the same bucket.

use async_trait::async_trait;
use courtside_domain::constants::{BUCKET_IDLE_EXPIRY_SECS, KEY_SEPARATOR, RATE_LIMIT_KEY_PREFIX};
use courtside_domain::error::Result;
use courtside_domain::ports::{RemoteBackend, TokenBucketBackend};
use std::sync::Arc;

/// Token bucket evaluated on the remote backend
#[derive(Debug, Clone)]
pub struct DistributedTokenBucket {
    remote: Arc<dyn RemoteBackend>,
    key_prefix: String,
    idle_expiry_secs: u64,
}

impl DistributedTokenBucket {
    /// Create a distributed bucket table on `remote` with default namespacing
    pub fn new(remote: Arc<dyn RemoteBackend>) -> Self {
        Self::with_options(remote, RATE_LIMIT_KEY_PREFIX, BUCKET_IDLE_EXPIRY_SECS)
    }

    /// Create a distributed bucket table with a custom key prefix and idle expiry
    pub fn with_options<S: Into<String>>(
        remote: Arc<dyn RemoteBackend>,
        key_prefix: S,
        idle_expiry_secs: u64,
    ) -> Self {
        Self {
            remote,
            key_prefix: key_prefix.into(),
            idle_expiry_secs,
        }
    }

    /// Fully qualified remote key for a logical bucket
    pub fn bucket_key(&self, key: &str) -> String {
        format!("{}{}{}", self.key_prefix, KEY_SEPARATOR, key)
    }
}

#[async_trait]
impl TokenBucketBackend for DistributedTokenBucket {
    async fn try_acquire(&self, key: &str, now: f64, rate: f64, amount: f64) -> Result<bool> {
        self.remote
            .eval_token_bucket(&self.bucket_key(key), now, rate, amount, self.idle_expiry_secs)
            .await
    }

    fn realization(&self) -> &str {
        "distributed"
    }
}
