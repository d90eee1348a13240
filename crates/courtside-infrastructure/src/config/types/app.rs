//! Main application configuration

use super::{CacheConfig, LoggingConfig, RateLimitConfig};
use serde::{Deserialize, Serialize};

/// Root configuration for the ephemeral-state subsystem
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Dual-backend cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Token bucket configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}
