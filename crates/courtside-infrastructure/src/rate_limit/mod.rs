//! Token bucket rate limiting
//!
//! Protects downstream APIs and batch endpoints. Capacity is expressed as
//! requests per minute and refills continuously.

pub mod bucket;

pub use bucket::TokenBucket;
