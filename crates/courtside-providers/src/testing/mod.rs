//! Remote backend doubles
//!
//! In-process implementations of [`RemoteBackend`](courtside_domain::ports::RemoteBackend)
//! for exercising the fallback policy without a running Redis server.
//!
//! | Double | Behavior |
//! |--------|----------|
//! | [`MemoryRemoteBackend`] | Working store with a switchable outage |
//! | [`FailingRemoteBackend`] | Every command fails as unavailable |

pub mod failing;
pub mod memory;

pub use failing::FailingRemoteBackend;
pub use memory::MemoryRemoteBackend;
