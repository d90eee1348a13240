//! Rate limit configuration types

use crate::constants::*;
use courtside_domain::constants::{BUCKET_IDLE_EXPIRY_SECS, RATE_LIMIT_KEY_PREFIX};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Token bucket configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Bucket capacity, also the refill per minute
    pub default_rpm: u32,

    /// Sleep between acquire attempts (milliseconds)
    pub retry_interval_ms: u64,

    /// Deadline used by `acquire_default` (milliseconds)
    pub default_acquire_timeout_ms: u64,

    /// Expiry refreshed on every distributed bucket call (seconds)
    pub bucket_idle_expiry_secs: u64,

    /// Namespace for distributed bucket keys
    pub key_prefix: String,
}

impl RateLimitConfig {
    /// Retry interval as a duration
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    /// Default acquire deadline as a duration
    pub fn default_acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.default_acquire_timeout_ms)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            default_rpm: RATE_LIMIT_DEFAULT_RPM,
            retry_interval_ms: RATE_LIMIT_RETRY_INTERVAL_MS,
            default_acquire_timeout_ms: RATE_LIMIT_ACQUIRE_TIMEOUT_MS,
            bucket_idle_expiry_secs: BUCKET_IDLE_EXPIRY_SECS,
            key_prefix: RATE_LIMIT_KEY_PREFIX.to_string(),
        }
    }
}
