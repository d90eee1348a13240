//! Cache counters
//!
//! Process-lifetime atomic counters, mirrored to the `metrics` facade so a
//! recorder installed by the host process sees them as
//! `courtside_cache_<counter>_total`.

use courtside_domain::{CacheCounter, MetricsSnapshot};
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared hit/miss/set/delete counters
#[derive(Debug, Default)]
pub struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
    deletes: AtomicU64,
}

impl CacheMetrics {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, counter: CacheCounter) -> &AtomicU64 {
        match counter {
            CacheCounter::Hits => &self.hits,
            CacheCounter::Misses => &self.misses,
            CacheCounter::Sets => &self.sets,
            CacheCounter::Deletes => &self.deletes,
        }
    }

    /// Add one to a counter
    pub fn increment(&self, counter: CacheCounter) {
        self.add(counter, 1);
    }

    /// Add `n` to a counter
    pub fn add(&self, counter: CacheCounter, n: u64) {
        if n == 0 {
            return;
        }
        self.slot(counter).fetch_add(n, Ordering::Relaxed);
        ::metrics::counter!(exported_name(counter)).increment(n);
    }

    /// Read a single counter
    pub fn get(&self, counter: CacheCounter) -> u64 {
        self.slot(counter).load(Ordering::Relaxed)
    }

    /// Copy all counters
    ///
    /// Each counter is read independently; under concurrent updates the
    /// snapshot is not a single atomic cut.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            hits: self.get(CacheCounter::Hits),
            misses: self.get(CacheCounter::Misses),
            sets: self.get(CacheCounter::Sets),
            deletes: self.get(CacheCounter::Deletes),
        }
    }

    /// Zero every counter
    pub fn reset(&self) {
        for counter in CacheCounter::ALL {
            self.slot(counter).store(0, Ordering::Relaxed);
        }
    }
}

/// Name under which a counter is exported to the metrics facade
pub fn exported_name(counter: CacheCounter) -> &'static str {
    match counter {
        CacheCounter::Hits => "courtside_cache_hits_total",
        CacheCounter::Misses => "courtside_cache_misses_total",
        CacheCounter::Sets => "courtside_cache_sets_total",
        CacheCounter::Deletes => "courtside_cache_deletes_total",
    }
}
