//! Cache Backend Implementations
//!
//! ## Available Backends
//!
//! | Backend | Type | Description |
//! |---------|------|-------------|
//! | [`FallbackStore`] | Local | Sharded in-process TTL map |
//! | [`RedisRemoteBackend`] | Distributed | Redis-backed, shared between instances |
//!
//! The fallback store is always present. The Redis backend is optional and
//! is wrapped by the infrastructure layer so that its failures degrade to the
//! fallback store.

pub mod fallback;
#[cfg(feature = "cache-redis")]
pub mod redis;

pub use fallback::FallbackStore;
#[cfg(feature = "cache-redis")]
pub use redis::RedisRemoteBackend;
