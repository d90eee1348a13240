//! Remote backend that is always down

use async_trait::async_trait;
use courtside_domain::error::{Error, Result};
use courtside_domain::ports::{RemoteBackend, ScanPage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Remote backend whose every command returns `RemoteUnavailable`
///
/// Counts the commands it received so tests can assert that the remote was
/// actually attempted before the fallback took over.
#[derive(Debug, Default)]
pub struct FailingRemoteBackend {
    calls: AtomicUsize,
}

impl FailingRemoteBackend {
    /// Create a failing backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of commands attempted so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn fail<T>(&self, command: &str) -> Result<T> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Err(Error::remote_unavailable(format!(
            "{} refused: connection refused",
            command
        )))
    }
}

#[async_trait]
impl RemoteBackend for FailingRemoteBackend {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        self.fail("GET")
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> Result<()> {
        self.fail("SET")
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        self.fail("DEL")
    }

    async fn scan(&self, _cursor: u64, _pattern: &str, _count: usize) -> Result<ScanPage> {
        self.fail("SCAN")
    }

    async fn delete_many(&self, _keys: &[String]) -> Result<usize> {
        self.fail("DEL")
    }

    async fn eval_token_bucket(
        &self,
        _key: &str,
        _now: f64,
        _rate: f64,
        _amount: f64,
        _idle_expiry_secs: u64,
    ) -> Result<bool> {
        self.fail("EVALSHA")
    }

    async fn ping(&self) -> Result<()> {
        self.fail("PING")
    }

    fn provider_name(&self) -> &str {
        "failing"
    }
}
