//! Ephemeral state composition root
//!
//! ```text
//! AppConfig → RemoteHandle ──┬─► CacheStore ──► InvalidationBroadcaster
//!                            │        ▲
//!             FallbackStore ─┘        │
//!             CacheMetrics ───────────┘
//!                            └─► TokenBucket
//! ```

use crate::cache::{CacheMetrics, CacheStore, RemoteHandle};
use crate::config::AppConfig;
use crate::config::loader::validate_app_config;
use crate::invalidation::InvalidationBroadcaster;
use crate::logging::log_health_check;
use crate::rate_limit::TokenBucket;
use crate::state::{BlockingEphemeralState, HealthReport, HealthStatus};
use crate::utils::{SystemClock, TimedOperation};
use courtside_domain::MetricsSnapshot;
use courtside_domain::error::Result;
use courtside_domain::ports::Clock;
use courtside_providers::cache::FallbackStore;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::info;

/// Shared cache, rate limiter and invalidation, built once per process
#[derive(Debug)]
pub struct EphemeralState {
    config: Arc<AppConfig>,
    remote: RemoteHandle,
    fallback: Arc<FallbackStore>,
    metrics: Arc<CacheMetrics>,
    cache: CacheStore,
    rate_limiter: TokenBucket,
    invalidation: InvalidationBroadcaster,
}

impl EphemeralState {
    /// Validate `config`, connect the remote backend and build every component
    ///
    /// An unreachable remote is not an error: the state starts fallback-only.
    pub async fn init(config: &AppConfig) -> Result<Self> {
        validate_app_config(config)?;
        let remote = RemoteHandle::connect(&config.cache).await;
        let state = Self::with_remote(config.clone(), remote);
        info!(
            mode = %state.cache.backend_mode(),
            rate_limiter = state.rate_limiter.realization(),
            "Ephemeral state initialized"
        );
        Ok(state)
    }

    /// Build every component around an injected remote handle
    ///
    /// `config` is used as given; call [`validate_app_config`] first when it
    /// comes from an untrusted source.
    pub fn with_remote(config: AppConfig, remote: RemoteHandle) -> Self {
        Self::with_clock(config, remote, Arc::new(SystemClock))
    }

    /// Build every component with an injected remote handle and time source
    pub fn with_clock(config: AppConfig, remote: RemoteHandle, clock: Arc<dyn Clock>) -> Self {
        let config = Arc::new(config);
        let fallback = Arc::new(FallbackStore::new());
        let metrics = Arc::new(CacheMetrics::new());
        let cache = CacheStore::new(
            remote.clone(),
            Arc::clone(&fallback),
            Arc::clone(&metrics),
            &config.cache,
        );
        let rate_limiter = TokenBucket::new(&remote, &config.rate_limit, clock);
        let invalidation = InvalidationBroadcaster::new(cache.clone());

        Self {
            config,
            remote,
            fallback,
            metrics,
            cache,
            rate_limiter,
            invalidation,
        }
    }

    /// Configuration the state was built from
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Dual-backend cache
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Token bucket rate limiter
    pub fn rate_limiter(&self) -> &TokenBucket {
        &self.rate_limiter
    }

    /// Prefix invalidation
    pub fn invalidation(&self) -> &InvalidationBroadcaster {
        &self.invalidation
    }

    /// Cache counters
    pub fn metrics(&self) -> &Arc<CacheMetrics> {
        &self.metrics
    }

    /// Remote backend handle
    pub fn remote(&self) -> &RemoteHandle {
        &self.remote
    }

    /// Synchronous facade over the same components
    ///
    /// The facade blocks the calling thread on `handle`; it must not be used
    /// from inside an async context.
    pub fn blocking(&self, handle: Handle) -> BlockingEphemeralState {
        BlockingEphemeralState::new(
            handle,
            self.cache.clone(),
            self.rate_limiter.clone(),
            self.invalidation.clone(),
        )
    }

    /// Ping the remote backend and summarize the subsystem
    pub async fn health(&self) -> HealthReport {
        let remote_configured = self.config.cache.remote_url().is_some();
        let (remote_latency_ms, remote_error) = match self.remote.backend() {
            Some(remote) => {
                let timer = TimedOperation::start();
                match remote.ping().await {
                    Ok(()) => (Some(timer.elapsed_ms()), None),
                    Err(e) => (None, Some(e.to_string())),
                }
            }
            None if remote_configured => (
                None,
                Some("remote backend unreachable at startup".to_string()),
            ),
            None => (None, None),
        };

        let status = if remote_error.is_some() {
            HealthStatus::Degraded
        } else {
            HealthStatus::Up
        };
        log_health_check("remote", status.is_healthy(), remote_error.as_deref());

        let metrics = self.metrics.snapshot();
        HealthReport {
            status,
            mode: self.cache.backend_mode(),
            remote_latency_ms,
            remote_error,
            fallback_entries: self.fallback.len(),
            rate_limiter: self.rate_limiter.realization().to_string(),
            hit_rate: metrics.hit_rate(),
            metrics,
        }
    }

    /// Log the final counters and release every backend
    pub fn shutdown(self) -> MetricsSnapshot {
        let snapshot = self.metrics.snapshot();
        info!(
            hits = snapshot.hits,
            misses = snapshot.misses,
            sets = snapshot.sets,
            deletes = snapshot.deletes,
            fallback_entries = self.fallback.len(),
            "Ephemeral state shut down"
        );
        snapshot
    }
}
