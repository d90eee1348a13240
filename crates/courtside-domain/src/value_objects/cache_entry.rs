//! Fallback cache entry

use std::time::{Duration, Instant};

/// A payload held by the in-process fallback store
///
/// Remote entries carry their own native TTL and never use this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Caller-serialized payload (typically JSON)
    pub value: String,
    /// Absolute expiry; `None` never expires
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Create an entry whose TTL starts at `now`
    ///
    /// A zero TTL is treated the same as no TTL.
    pub fn created_at<S: Into<String>>(value: S, ttl: Option<Duration>, now: Instant) -> Self {
        let expires_at = ttl
            .filter(|ttl| !ttl.is_zero())
            .and_then(|ttl| now.checked_add(ttl));
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Check whether the entry is logically absent at `now`
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    /// Check whether the entry is logically absent
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}
