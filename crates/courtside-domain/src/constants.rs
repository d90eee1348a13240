//! Domain constants
//!
//! Values that are part of the subsystem's observable contract. Tunables that
//! operators may change live in the infrastructure configuration.

/// Default TTL for derived summaries (5 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Inactive distributed buckets expire after this many seconds
pub const BUCKET_IDLE_EXPIRY_SECS: u64 = 120;

/// Refill rates are expressed per minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Namespace for distributed bucket keys
pub const RATE_LIMIT_KEY_PREFIX: &str = "ratelimit";

/// Namespace for cached model predictions
pub const PREDICTION_NAMESPACE: &str = "predict";

/// Namespace for cached model context
pub const CONTEXT_NAMESPACE: &str = "context";

/// Cache key separator
pub const KEY_SEPARATOR: &str = ":";
