//! Fallback cache entry tests

use courtside_domain::CacheEntry;
use std::time::{Duration, Instant};

#[test]
fn test_entry_without_ttl_never_expires() {
    let now = Instant::now();
    let entry = CacheEntry::created_at("v", None, now);
    assert!(entry.expires_at.is_none());
    assert!(!entry.is_expired_at(now + Duration::from_secs(86_400)));
}

#[test]
fn test_zero_ttl_means_no_expiry() {
    let entry = CacheEntry::created_at("v", Some(Duration::ZERO), Instant::now());
    assert!(entry.expires_at.is_none());
}

#[test]
fn test_entry_expires_at_deadline() {
    let now = Instant::now();
    let entry = CacheEntry::created_at("v", Some(Duration::from_secs(10)), now);
    assert!(!entry.is_expired_at(now + Duration::from_secs(5)));
    assert!(entry.is_expired_at(now + Duration::from_secs(10)));
    assert!(entry.is_expired_at(now + Duration::from_secs(12)));
}
