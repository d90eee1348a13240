//! Configuration management
//!
//! Figment-based layering of defaults, an optional TOML file and
//! `COURTSIDE__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, CacheConfig, LoggingConfig, RateLimitConfig};
