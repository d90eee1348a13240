//! Time Source Port
//!
//! Bucket refill is computed from wall-clock seconds so that the local and
//! the distributed realization see the same `now`. Tests substitute a manual
//! clock to make refill deterministic.

/// Wall-clock time source
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current time as UNIX epoch seconds
    fn now_secs(&self) -> f64;
}
