//! # Courtside
//!
//! Shared ephemeral state for the stats backend: a remote-first cache with an
//! in-process fallback, a token-bucket rate limiter and prefix invalidation.
//!
//! This crate is the public facade. It re-exports the layer crates and hosts
//! the operator CLI.
//!
//! ## Example
//!
//! ```ignore
//! use courtside::infrastructure::{ConfigLoader, EphemeralState};
//! use std::time::Duration;
//!
//! let config = ConfigLoader::new().load()?;
//! let state = EphemeralState::init(&config).await?;
//!
//! state.cache().set("summary:team:LAL", "{\"wins\":50}", None).await;
//! if state.rate_limiter().acquire("client:10.0.0.1", 1, Duration::from_secs(1)).await {
//!     // serve the request
//! }
//! state.invalidation().purge_model_artifact("m7").await;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Errors, value objects and the backend ports
//! - `providers` - Redis backend, fallback store, bucket realizations
//! - `infrastructure` - Fallback policy, metrics, config, logging, lifecycle

/// Domain layer - core types and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use courtside_domain::*;
}

/// Providers - backend adapters
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use courtside_providers::*;
}

/// Infrastructure layer - composition, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use courtside_infrastructure::*;
}

pub mod cli;

// Re-export commonly used types at the crate root
pub use domain::{CacheCounter, Error, MetricsSnapshot, Result};
pub use infrastructure::{
    AppConfig, BlockingEphemeralState, CacheStore, ConfigLoader, EphemeralState, HealthReport,
    HealthStatus, InvalidationBroadcaster, PurgeReport, TokenBucket,
};
