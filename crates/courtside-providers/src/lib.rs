//! # Courtside - Provider Implementations
//!
//! Adapters implementing the ports defined in `courtside-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Remote backend | `RemoteBackend` | Redis, Memory (testing), Failing (testing) |
//! | Fallback cache | - | `FallbackStore` |
//! | Token bucket | `TokenBucketBackend` | Local (mutex), Distributed (server-side script) |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! courtside-providers = { version = "0.1", default-features = false }
//! ```
//!
//! Disabling `cache-redis` leaves a fallback-only build.

pub use courtside_domain::error::{Error, Result};
pub use courtside_domain::ports::{RemoteBackend, TokenBucketBackend};

/// Provider-specific constants
pub mod constants;

/// Cache backends
pub mod cache;

/// Token bucket realizations
pub mod rate_limit;

/// In-process doubles for the remote backend
pub mod testing;
