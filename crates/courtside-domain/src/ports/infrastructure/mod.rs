//! Infrastructure Service Ports

/// Time source port
pub mod clock;

pub use clock::Clock;
