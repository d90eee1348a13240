//! Token Bucket Realizations
//!
//! Both realizations apply `BucketState::refill_and_take` and are
//! interchangeable behind [`TokenBucketBackend`](courtside_domain::ports::TokenBucketBackend).
//!
//! | Realization | Atomicity | Used when |
//! |-------------|-----------|-----------|
//! | [`DistributedTokenBucket`] | Server-side script | Remote backend connected |
//! | [`LocalTokenBucket`] | Process mutex | Remote absent, or a distributed attempt failed |

pub mod distributed;
pub mod local;
pub mod script;

pub use distributed::DistributedTokenBucket;
pub use local::LocalTokenBucket;
