//! External Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | RemoteBackend | Distributed key-value store command subset |
//! | TokenBucketBackend | One realization of the token-bucket refill math |

/// Token bucket realization port
pub mod rate_limit;
/// Distributed key-value store port
pub mod remote;

pub use rate_limit::TokenBucketBackend;
pub use remote::{RemoteBackend, ScanPage, prefix_pattern};
