//! Domain Port Interfaces
//!
//! Boundary contracts between the domain and the outer layers.
//!
//! ## Organization
//!
//! - **providers/** - Adapters for the distributed store and bucket realizations
//! - **infrastructure/** - Process services (time source)

/// Infrastructure service ports
pub mod infrastructure;
/// External provider ports
pub mod providers;

pub use infrastructure::Clock;
pub use providers::{RemoteBackend, ScanPage, TokenBucketBackend, prefix_pattern};
