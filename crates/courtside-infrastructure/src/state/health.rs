//! Health reporting

use crate::cache::BackendMode;
use courtside_domain::MetricsSnapshot;
use serde::Serialize;

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every configured backend is reachable
    Up,
    /// A configured remote backend is unreachable; the fallback is serving
    Degraded,
}

impl HealthStatus {
    /// Check if the status indicates the service is healthy
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Up)
    }
}

/// Point-in-time view of the ephemeral-state subsystem
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// Overall status
    pub status: HealthStatus,
    /// Preferred cache backend
    pub mode: BackendMode,
    /// Round trip of a remote `PING` (milliseconds), when it succeeded
    pub remote_latency_ms: Option<u64>,
    /// Why the remote is not serving, if it is not
    pub remote_error: Option<String>,
    /// Live entries in the fallback store
    pub fallback_entries: usize,
    /// Bucket realization tried first
    pub rate_limiter: String,
    /// Cache counters
    pub metrics: MetricsSnapshot,
    /// Hits over lookups
    pub hit_rate: f64,
}
