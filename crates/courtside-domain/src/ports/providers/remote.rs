//! Remote Backend Port
//!
//! The command subset of a distributed key-value store used by the cache and
//! the distributed rate limiter: `GET`, `SET [EX|PX]`, `DEL`,
//! `SCAN cursor MATCH pattern COUNT n`, atomic script execution and `PING`.
//!
//! Implementations report every failure as an error value. They never fall
//! back on their own; that policy belongs to the infrastructure layer.

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// One page of a cursor-based key scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPage {
    /// Cursor to pass to the next call; `0` means the iteration is complete
    pub cursor: u64,
    /// Keys returned by this page (may be empty even when `cursor != 0`)
    pub keys: Vec<String>,
}

impl ScanPage {
    /// True when the server signalled the end of the iteration
    pub fn is_last(&self) -> bool {
        self.cursor == 0
    }
}

/// Build a `SCAN ... MATCH` pattern selecting every key that starts with `prefix`
///
/// Glob metacharacters in the prefix are escaped so they match literally.
pub fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('*');
    pattern
}

/// Distributed key-value store port
///
/// # Example
///
/// ```ignore
/// use courtside_domain::ports::RemoteBackend;
/// use std::time::Duration;
///
/// remote.set("summary:team:LAL", &json, Some(Duration::from_secs(300))).await?;
/// let cached = remote.get("summary:team:LAL").await?;
/// ```
#[async_trait]
pub trait RemoteBackend: Send + Sync + std::fmt::Debug {
    /// `GET key`
    ///
    /// # Returns
    /// The stored payload, `None` when the key does not exist
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// `SET key value [EX seconds | PX millis]`
    ///
    /// `ttl` of `None` stores the value without expiry.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()>;

    /// `DEL key`
    ///
    /// # Returns
    /// True if the key existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// `SCAN cursor MATCH pattern COUNT count`
    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<ScanPage>;

    /// `DEL key [key ...]`
    ///
    /// # Returns
    /// Number of keys removed
    async fn delete_many(&self, keys: &[String]) -> Result<usize>;

    /// Run the token-bucket refill-and-take script atomically on the server
    ///
    /// # Arguments
    /// * `key` - Fully qualified bucket key
    /// * `now` - Caller wall-clock time in UNIX epoch seconds
    /// * `rate` - Capacity, expressed as requests per minute
    /// * `amount` - Tokens requested
    /// * `idle_expiry_secs` - Expiry applied to the bucket on every call
    ///
    /// # Returns
    /// True when the tokens were granted
    async fn eval_token_bucket(
        &self,
        key: &str,
        now: f64,
        rate: f64,
        amount: f64,
        idle_expiry_secs: u64,
    ) -> Result<bool>;

    /// `PING`
    async fn ping(&self) -> Result<()>;

    /// Identifier of this implementation (e.g. "redis")
    fn provider_name(&self) -> &str;
}
