//! Infrastructure layer constants
//!
//! Defaults for every tunable in [`AppConfig`](crate::config::AppConfig).

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "courtside.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "courtside";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "COURTSIDE";

/// Separator between nested keys in configuration environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Plain connection URL variable accepted as an alias for `cache.redis_url`
pub const REDIS_URL_ENV: &str = "REDIS_URL";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Default bound on a single remote command (milliseconds)
pub const CACHE_OPERATION_TIMEOUT_MS: u64 =
    courtside_providers::constants::REMOTE_OPERATION_TIMEOUT_MS;

/// Default bound on connecting to the remote backend (milliseconds)
pub const CACHE_CONNECT_TIMEOUT_MS: u64 =
    courtside_providers::constants::REMOTE_CONNECT_TIMEOUT_MS;

/// Default `COUNT` hint for prefix scans
pub const CACHE_SCAN_BATCH_SIZE: usize = 200;

// ============================================================================
// RATE LIMIT CONSTANTS
// ============================================================================

/// Default bucket capacity (requests per minute)
pub const RATE_LIMIT_DEFAULT_RPM: u32 = 60;

/// Default sleep between acquire attempts (milliseconds)
pub const RATE_LIMIT_RETRY_INTERVAL_MS: u64 = 50;

/// Default acquire deadline (milliseconds)
pub const RATE_LIMIT_ACQUIRE_TIMEOUT_MS: u64 = 1_000;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV: &str = "COURTSIDE_LOG";

/// File stem used when the configured log path has none
pub const LOG_FILE_STEM: &str = "courtside";

// ============================================================================
// METRICS CONSTANTS
// ============================================================================

/// Prefix of every exported cache counter
pub const METRICS_PREFIX: &str = "courtside_cache";
