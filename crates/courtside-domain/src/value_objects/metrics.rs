//! Cache counters

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four cache counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheCounter {
    /// `get` observed a value
    Hits,
    /// `get` observed nothing
    Misses,
    /// `set` stored a value on some backend
    Sets,
    /// Keys removed by `delete` or `delete_prefix`
    Deletes,
}

impl CacheCounter {
    /// All counters in snapshot order
    pub const ALL: [CacheCounter; 4] = [Self::Hits, Self::Misses, Self::Sets, Self::Deletes];

    /// Counter name used in logs and exported metric names
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hits => "hits",
            Self::Misses => "misses",
            Self::Sets => "sets",
            Self::Deletes => "deletes",
        }
    }
}

impl fmt::Display for CacheCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Point-in-time copy of the cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of successful sets
    pub sets: u64,
    /// Number of keys deleted
    pub deletes: u64,
}

impl MetricsSnapshot {
    /// Value of a single counter
    pub fn get(&self, counter: CacheCounter) -> u64 {
        match counter {
            CacheCounter::Hits => self.hits,
            CacheCounter::Misses => self.misses,
            CacheCounter::Sets => self.sets,
            CacheCounter::Deletes => self.deletes,
        }
    }

    /// Calculate hit rate from hits and misses
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}
