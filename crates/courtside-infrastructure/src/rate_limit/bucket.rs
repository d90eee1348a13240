//! Token bucket
//!
//! Each attempt goes to the distributed realization when a remote backend is
//! connected; an attempt that fails there is retried once against the local
//! realization. `acquire` repeats attempts on a fixed interval until the
//! caller's deadline.

use crate::cache::RemoteHandle;
use crate::config::RateLimitConfig;
use crate::utils::TimedOperation;
use courtside_domain::ports::{Clock, TokenBucketBackend};
use courtside_providers::rate_limit::{DistributedTokenBucket, LocalTokenBucket};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Token bucket rate limiter
///
/// Cloning is cheap; clones share bucket tables.
#[derive(Debug, Clone)]
pub struct TokenBucket {
    distributed: Option<DistributedTokenBucket>,
    local: Arc<LocalTokenBucket>,
    clock: Arc<dyn Clock>,
    rate: f64,
    retry_interval: Duration,
    default_timeout: Duration,
}

impl TokenBucket {
    /// Create a limiter distributed over `remote` when it is connected
    pub fn new(remote: &RemoteHandle, config: &RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        let distributed = remote.backend().map(|backend| {
            DistributedTokenBucket::with_options(
                Arc::clone(backend),
                config.key_prefix.clone(),
                config.bucket_idle_expiry_secs,
            )
        });
        Self {
            distributed,
            local: Arc::new(LocalTokenBucket::new()),
            clock,
            rate: f64::from(config.default_rpm),
            retry_interval: config.retry_interval(),
            default_timeout: config.default_acquire_timeout(),
        }
    }

    /// Same backends with a different capacity (requests per minute)
    ///
    /// Bucket tables are shared, so callers should use keys that are distinct
    /// from those used at other rates.
    pub fn with_rate(&self, rpm: u32) -> Self {
        Self {
            rate: f64::from(rpm),
            ..self.clone()
        }
    }

    /// Capacity in requests per minute
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Realization tried first ("distributed" or "local")
    pub fn realization(&self) -> &str {
        match &self.distributed {
            Some(distributed) => distributed.realization(),
            None => self.local.realization(),
        }
    }

    /// Take `amount` tokens, retrying until `timeout` elapses
    ///
    /// A zero `timeout` makes a single attempt and `Duration::MAX` waits
    /// without limit. The call never sleeps past the deadline.
    ///
    /// # Returns
    /// False when rate limited; callers must reject rather than retry
    pub async fn acquire(&self, key: &str, amount: u32, timeout: Duration) -> bool {
        let amount = f64::from(amount);
        if amount > self.rate {
            debug!(
                key = key,
                amount = amount,
                capacity = self.rate,
                "Requested tokens exceed bucket capacity"
            );
            return false;
        }

        let timer = TimedOperation::start();
        loop {
            if self.attempt(key, amount).await {
                return true;
            }
            let Some(pause) = timer.next_pause(timeout, self.retry_interval) else {
                debug!(
                    key = key,
                    amount = amount,
                    waited_ms = timer.elapsed_ms(),
                    "Rate limited"
                );
                return false;
            };
            sleep(pause).await;
        }
    }

    /// Take `amount` tokens with the configured default deadline
    pub async fn acquire_default(&self, key: &str, amount: u32) -> bool {
        self.acquire(key, amount, self.default_timeout).await
    }

    /// Take `amount` tokens with a single attempt
    pub async fn try_acquire(&self, key: &str, amount: u32) -> bool {
        self.attempt(key, f64::from(amount)).await
    }

    async fn attempt(&self, key: &str, amount: f64) -> bool {
        let now = self.clock.now_secs();
        if let Some(distributed) = &self.distributed {
            match distributed.try_acquire(key, now, self.rate, amount).await {
                Ok(granted) => return granted,
                Err(e) => warn!(
                    key = key,
                    kind = e.kind(),
                    error = %e,
                    "Distributed rate limit failed, using local bucket"
                ),
            }
        }
        self.local.take(key, now, self.rate, amount)
    }
}
