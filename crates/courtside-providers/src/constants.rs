//! Provider-specific constants

/// Default bound on a single remote operation (milliseconds)
pub const REMOTE_OPERATION_TIMEOUT_MS: u64 = 500;

/// Default bound on establishing the remote connection (milliseconds)
pub const REMOTE_CONNECT_TIMEOUT_MS: u64 = 2_000;

/// Default URL used when a Redis backend is requested without one
pub const REDIS_DEFAULT_URL: &str = "redis://localhost:6379";
