//! # Infrastructure Layer
//!
//! Composition of the shared ephemeral-state subsystem: the fallback policy,
//! counters, lifecycle, configuration and logging.
//!
//! ## Module Categories
//!
//! ### Ephemeral State
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Remote-first cache with transparent fallback |
//! | [`rate_limit`] | Token bucket with distributed and local realizations |
//! | [`invalidation`] | Prefix purges across both backends |
//! | [`state`] | Service object with init/shutdown and a blocking facade |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment layering of defaults, TOML and environment |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod invalidation;
pub mod logging;
pub mod rate_limit;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use cache::{BackendMode, CacheMetrics, CacheStore, RemoteHandle};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
pub use invalidation::{InvalidationBroadcaster, PurgeReport};
pub use rate_limit::TokenBucket;
pub use state::{BlockingEphemeralState, EphemeralState, HealthReport, HealthStatus};
pub use utils::TimedOperation;
