//! Redis remote backend
//!
//! Distributed backend using Redis. Suitable for multi-instance deployments
//! where every instance must observe the same cache and rate-limit state.
//!
//! ## Features
//!
//! - Auto-reconnecting connection via `ConnectionManager`
//! - Every command bounded by an operation timeout
//! - Cursor-based `SCAN` for prefix iteration (never `KEYS`)
//! - Token bucket executed as a single server-side Lua script
//!
//! ## Example
//!
//! ```ignore
//! use courtside_providers::cache::RedisRemoteBackend;
//! use std::time::Duration;
//!
//! let remote = RedisRemoteBackend::connect(
//!     "redis://localhost:6379",
//!     Duration::from_secs(2),
//!     Duration::from_millis(500),
//! )
//! .await?;
//! ```

use crate::rate_limit::script::TOKEN_BUCKET_SCRIPT;
use async_trait::async_trait;
use courtside_domain::error::{Error, Result};
use courtside_domain::ports::{RemoteBackend, ScanPage};
use redis::aio::ConnectionManager;
use redis::{Client, RedisError, RedisResult, Script};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// Redis remote backend
///
/// Cloning is cheap: clones share the underlying multiplexed connection.
#[derive(Clone)]
pub struct RedisRemoteBackend {
    connection: ConnectionManager,
    operation_timeout: Duration,
    script: Script,
    address: String,
}

impl RedisRemoteBackend {
    /// Connect to Redis and verify the connection with `PING`
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    /// * `connect_timeout` - Bound on establishing the connection
    /// * `operation_timeout` - Bound applied to every subsequent command
    pub async fn connect(
        url: &str,
        connect_timeout: Duration,
        operation_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::open(url).map_err(|e| {
            Error::configuration_with_source(format!("Invalid Redis URL: {}", e), e)
        })?;

        let connection = match timeout(connect_timeout, ConnectionManager::new(client)).await {
            Ok(Ok(connection)) => connection,
            Ok(Err(e)) => return Err(classify("connect", e)),
            Err(_) => {
                return Err(Error::remote_unavailable(format!(
                    "Redis connection timed out after {}ms",
                    connect_timeout.as_millis()
                )));
            }
        };

        let backend = Self {
            connection,
            operation_timeout,
            script: Script::new(TOKEN_BUCKET_SCRIPT),
            address: redact_url(url),
        };
        backend.ping().await?;
        Ok(backend)
    }

    /// Get the Redis server address (credentials removed)
    pub fn server_address(&self) -> &str {
        &self.address
    }

    /// Get the per-command timeout
    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }

    async fn run<T, F>(&self, operation: &'static str, command: F) -> Result<T>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match timeout(self.operation_timeout, command).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(classify(operation, e)),
            Err(_) => Err(Error::remote_unavailable(format!(
                "Redis {} timed out after {}ms",
                operation,
                self.operation_timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl RemoteBackend for RedisRemoteBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection.clone();
        let raw = self
            .run("GET", async move {
                redis::cmd("GET")
                    .arg(key)
                    .query_async::<Option<Vec<u8>>>(&mut conn)
                    .await
            })
            .await?;

        raw.map(|bytes| {
            String::from_utf8(bytes).map_err(|e| {
                Error::decode_with_source(format!("Invalid UTF-8 in cached value for {}", key), e)
            })
        })
        .transpose()
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl.filter(|ttl| !ttl.is_zero()) {
            if ttl.subsec_nanos() == 0 {
                cmd.arg("EX").arg(ttl.as_secs());
            } else {
                cmd.arg("PX").arg(ttl.as_millis().max(1) as u64);
            }
        }

        let mut conn = self.connection.clone();
        self.run("SET", async move { cmd.query_async::<()>(&mut conn).await })
            .await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection.clone();
        let deleted = self
            .run("DEL", async move {
                redis::cmd("DEL").arg(key).query_async::<i64>(&mut conn).await
            })
            .await?;
        Ok(deleted > 0)
    }

    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<ScanPage> {
        let mut conn = self.connection.clone();
        let (cursor, keys) = self
            .run("SCAN", async move {
                redis::cmd("SCAN")
                    .arg(cursor)
                    .arg("MATCH")
                    .arg(pattern)
                    .arg("COUNT")
                    .arg(count)
                    .query_async::<(u64, Vec<String>)>(&mut conn)
                    .await
            })
            .await?;
        Ok(ScanPage { cursor, keys })
    }

    async fn delete_many(&self, keys: &[String]) -> Result<usize> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connection.clone();
        let deleted = self
            .run("DEL", async move {
                redis::cmd("DEL").arg(keys).query_async::<i64>(&mut conn).await
            })
            .await?;
        Ok(deleted.max(0) as usize)
    }

    async fn eval_token_bucket(
        &self,
        key: &str,
        now: f64,
        rate: f64,
        amount: f64,
        idle_expiry_secs: u64,
    ) -> Result<bool> {
        let mut conn = self.connection.clone();
        let script = &self.script;
        let allowed: i64 = self
            .run("EVALSHA", async move {
                let mut invocation = script.key(key);
                invocation
                    .arg(now)
                    .arg(rate)
                    .arg(amount)
                    .arg(idle_expiry_secs);
                invocation.invoke_async(&mut conn).await
            })
            .await?;

        match allowed {
            1 => Ok(true),
            0 => Ok(false),
            other => Err(Error::remote_protocol(format!(
                "Token bucket script returned {} (expected 0 or 1)",
                other
            ))),
        }
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection.clone();
        self.run("PING", async move {
            redis::cmd("PING").query_async::<String>(&mut conn).await
        })
        .await
        .map(|_| ())
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisRemoteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisRemoteBackend")
            .field("server", &self.address)
            .field("operation_timeout", &self.operation_timeout)
            .finish()
    }
}

/// Map a Redis error onto the domain taxonomy
fn classify(operation: &str, err: RedisError) -> Error {
    let message = format!("Redis {} failed: {}", operation, err);
    if err.is_io_error()
        || err.is_timeout()
        || err.is_connection_dropped()
        || err.is_connection_refusal()
    {
        Error::remote_unavailable_with_source(message, err)
    } else {
        Error::remote_protocol_with_source(message, err)
    }
}

/// Strip `user:password@` from a connection URL before it reaches logs
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}
