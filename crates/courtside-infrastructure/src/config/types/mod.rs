//! Configuration types module

pub mod app;
pub mod cache;
pub mod logging;
pub mod rate_limit;

// Re-export main types
pub use app::AppConfig;
pub use cache::CacheConfig;
pub use logging::LoggingConfig;
pub use rate_limit::RateLimitConfig;
