//! # Courtside Domain Layer
//!
//! Core types and boundary contracts for the shared ephemeral-state subsystem:
//! the dual-backend cache, the token-bucket rate limiter and prefix
//! invalidation.
//!
//! This crate performs no I/O. Adapters live in `courtside-providers` and the
//! composition (fallback policy, metrics, lifecycle) lives in
//! `courtside-infrastructure`.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy shared by every layer |
//! | [`constants`] | Domain constants (bucket expiry, default TTL) |
//! | [`ports`] | Traits implemented by adapters |
//! | [`value_objects`] | Cache entries, bucket state, metrics snapshots |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{Clock, RemoteBackend, ScanPage, TokenBucketBackend};
pub use value_objects::{BucketState, CacheCounter, CacheEntry, MetricsSnapshot};
