//! Prefix invalidation
//!
//! Used by write paths (e.g. a replaced prediction model) to evict every
//! cached value derived from stale data.

pub mod broadcaster;

pub use broadcaster::{InvalidationBroadcaster, PrefixPurge, PurgeReport};
