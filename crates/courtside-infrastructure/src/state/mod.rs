//! Ephemeral state service
//!
//! One service object owns the fallback store, the bucket tables and the
//! counters for the lifetime of the process. Async call sites use it
//! directly; synchronous call sites go through [`BlockingEphemeralState`],
//! which drives the same objects.

pub mod blocking;
pub mod health;
pub mod service;

pub use blocking::BlockingEphemeralState;
pub use health::{HealthReport, HealthStatus};
pub use service::EphemeralState;
