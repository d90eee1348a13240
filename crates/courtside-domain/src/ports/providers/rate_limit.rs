//! Token Bucket Realization Port
//!
//! A realization performs a single refill-and-take attempt. Retrying until a
//! deadline and falling back between realizations is done by the caller.

use crate::error::Result;
use async_trait::async_trait;

/// One realization of the token-bucket contract
///
/// Every realization must apply [`crate::value_objects::BucketState::refill_and_take`]
/// semantics exactly, so that callers cannot tell them apart.
#[async_trait]
pub trait TokenBucketBackend: Send + Sync + std::fmt::Debug {
    /// Refill the bucket for `key` up to `now` and take `amount` tokens if available
    ///
    /// # Returns
    /// True when the tokens were granted. The bucket state is persisted
    /// whether or not the attempt succeeded.
    async fn try_acquire(&self, key: &str, now: f64, rate: f64, amount: f64) -> Result<bool>;

    /// Name of the realization ("local", "distributed")
    fn realization(&self) -> &str;
}
