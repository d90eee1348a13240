//! Value Objects
//!
//! Immutable-by-convention data carried between the layers.

/// Token bucket state and refill math
pub mod bucket;
/// Fallback cache entries
pub mod cache_entry;
/// Cache counters
pub mod metrics;

pub use bucket::BucketState;
pub use cache_entry::CacheEntry;
pub use metrics::{CacheCounter, MetricsSnapshot};
