//! Cache configuration types

use crate::constants::*;
use courtside_domain::constants::DEFAULT_CACHE_TTL_SECS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Remote backend URL; absent or empty runs fallback-only
    pub redis_url: Option<String>,

    /// TTL used by `set_default` (seconds)
    pub default_ttl_secs: u64,

    /// Bound on a single remote command (milliseconds)
    pub operation_timeout_ms: u64,

    /// Bound on establishing the remote connection (milliseconds)
    pub connect_timeout_ms: u64,

    /// `COUNT` hint for prefix scans
    pub scan_batch_size: usize,
}

impl CacheConfig {
    /// The configured remote URL, treating an empty string as absent
    pub fn remote_url(&self) -> Option<&str> {
        self.redis_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Default TTL as a duration
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Operation timeout as a duration
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    /// Connect timeout as a duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            default_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            operation_timeout_ms: CACHE_OPERATION_TIMEOUT_MS,
            connect_timeout_ms: CACHE_CONNECT_TIMEOUT_MS,
            scan_batch_size: CACHE_SCAN_BATCH_SIZE,
        }
    }
}
