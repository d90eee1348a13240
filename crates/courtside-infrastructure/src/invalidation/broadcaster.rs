//! Invalidation broadcaster
//!
//! Purges are best-effort: per-prefix failures are absorbed by
//! [`CacheStore::delete_prefix`] and TTL expiry bounds staleness regardless.

use crate::cache::CacheStore;
use crate::utils::TimedOperation;
use courtside_domain::constants::{CONTEXT_NAMESPACE, KEY_SEPARATOR, PREDICTION_NAMESPACE};
use serde::Serialize;
use tracing::info;

/// Keys removed for one prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefixPurge {
    /// The purged prefix
    pub prefix: String,
    /// Keys removed across both backends
    pub removed: usize,
}

/// Outcome of a purge, for logs and tests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PurgeReport {
    /// One entry per requested prefix, in request order
    pub prefixes: Vec<PrefixPurge>,
    /// Wall time spent purging (milliseconds)
    pub elapsed_ms: u64,
}

impl PurgeReport {
    /// Total keys removed
    pub fn total_removed(&self) -> usize {
        self.prefixes.iter().map(|p| p.removed).sum()
    }

    /// Keys removed for `prefix`, if it was part of the purge
    pub fn removed_for(&self, prefix: &str) -> Option<usize> {
        self.prefixes
            .iter()
            .find(|p| p.prefix == prefix)
            .map(|p| p.removed)
    }
}

/// Fans a purge out over a set of prefixes
#[derive(Debug, Clone)]
pub struct InvalidationBroadcaster {
    cache: CacheStore,
}

impl InvalidationBroadcaster {
    /// Create a broadcaster purging through `cache`
    pub fn new(cache: CacheStore) -> Self {
        Self { cache }
    }

    /// Delete every key under each prefix on both backends
    ///
    /// Never fails; returns once every prefix has been processed.
    pub async fn purge<I, S>(&self, prefixes: I) -> PurgeReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let timer = TimedOperation::start();
        let mut report = PurgeReport::default();
        for prefix in prefixes {
            let prefix = prefix.as_ref();
            let removed = self.cache.delete_prefix(prefix).await;
            report.prefixes.push(PrefixPurge {
                prefix: prefix.to_string(),
                removed,
            });
        }
        report.elapsed_ms = timer.elapsed_ms();

        info!(
            prefixes = report.prefixes.len(),
            removed = report.total_removed(),
            elapsed_ms = report.elapsed_ms,
            "Cache purge completed"
        );
        report
    }

    /// Evict cached predictions and context derived from a model artifact
    pub async fn purge_model_artifact(&self, model_id: &str) -> PurgeReport {
        self.purge(model_artifact_prefixes(model_id)).await
    }
}

/// Prefixes holding values derived from `model_id`
pub fn model_artifact_prefixes(model_id: &str) -> [String; 2] {
    [PREDICTION_NAMESPACE, CONTEXT_NAMESPACE]
        .map(|namespace| {
            format!(
                "{}{}{}{}",
                namespace, KEY_SEPARATOR, model_id, KEY_SEPARATOR
            )
        })
}
