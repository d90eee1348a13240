//! Dual-backend cache
//!
//! Remote-first cache with transparent degradation to the in-process
//! [`FallbackStore`](courtside_providers::cache::FallbackStore).
//!
//! ## Architecture
//!
//! ```text
//! CacheStore ──► RemoteHandle::Connected(RemoteBackend)   (preferred)
//!      │                  └── error ──┐
//!      └────────────► FallbackStore ◄─┘                    (degraded)
//! ```
//!
//! Backend failures never surface to callers: they become a `warn` log and a
//! fallback read or write.

pub mod metrics;
pub mod remote;
pub mod store;

pub use metrics::CacheMetrics;
pub use remote::{BackendMode, RemoteHandle};
pub use store::CacheStore;
