//! Fallback store tests

use courtside_providers::cache::FallbackStore;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_zero_ttl_never_expires() {
    let store = FallbackStore::new();
    store.set("k", "v", Some(Duration::ZERO));
    std::thread::sleep(Duration::from_millis(5));
    assert_eq!(store.get("k"), Some("v".to_string()));
}

#[test]
fn test_delete_prefix_only_touches_matching_keys() {
    let store = FallbackStore::new();
    store.set("predict:a", "1", None);
    store.set("predict:b", "2", None);
    store.set("context:a", "3", None);

    let mut removed = store.delete_prefix("predict:");
    removed.sort();
    assert_eq!(removed, vec!["predict:a".to_string(), "predict:b".to_string()]);
    assert_eq!(store.get("predict:a"), None);
    assert_eq!(store.get("context:a"), Some("3".to_string()));
    assert!(store.delete_prefix("predict:").is_empty());
}

#[test]
fn test_delete_prefix_does_not_count_expired_entries() {
    let store = FallbackStore::new();
    store.set("p:live", "1", None);
    store.set("p:dead", "2", Some(Duration::from_millis(1)));
    std::thread::sleep(Duration::from_millis(5));
    assert_eq!(store.delete_prefix("p:"), vec!["p:live".to_string()]);
    assert!(store.is_empty());
}

#[test]
fn test_purge_expired_reports_removed_entries() {
    let store = FallbackStore::new();
    store.set("a", "1", Some(Duration::from_millis(1)));
    store.set("b", "2", Some(Duration::from_millis(1)));
    store.set("c", "3", None);
    std::thread::sleep(Duration::from_millis(5));
    assert_eq!(store.purge_expired(), 2);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_clear_removes_everything() {
    let store = FallbackStore::new();
    for i in 0..500 {
        store.set(&format!("k{}", i), "v", None);
    }
    assert_eq!(store.len(), 500);
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn test_concurrent_writers_do_not_lose_keys() {
    let store = Arc::new(FallbackStore::new());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..100 {
                    store.set(&format!("t{}:{}", t, i), "v", None);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer thread panicked");
    }
    assert_eq!(store.len(), 800);
}
