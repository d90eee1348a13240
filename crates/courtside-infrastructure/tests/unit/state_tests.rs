//! Ephemeral state lifecycle tests

use crate::test_utils::{fallback_state, memory_state};
use courtside_infrastructure::cache::BackendMode;
use courtside_infrastructure::config::{AppConfig, CacheConfig, ConfigBuilder};
use courtside_infrastructure::{EphemeralState, HealthStatus};
use std::time::Duration;

#[tokio::test]
async fn test_init_without_url_is_fallback_only_and_up() {
    let state = EphemeralState::init(&AppConfig::default())
        .await
        .expect("default config is valid");
    assert_eq!(state.cache().backend_mode(), BackendMode::FallbackOnly);
    assert_eq!(state.rate_limiter().realization(), "local");

    let health = state.health().await;
    assert_eq!(health.status, HealthStatus::Up);
    assert!(health.remote_error.is_none());
}

#[cfg(feature = "cache-redis")]
#[tokio::test]
async fn test_init_with_unreachable_remote_is_degraded() {
    let config = ConfigBuilder::new()
        .with_cache(CacheConfig {
            redis_url: Some("redis://127.0.0.1:1".to_string()),
            connect_timeout_ms: 300,
            operation_timeout_ms: 100,
            ..CacheConfig::default()
        })
        .build();

    let state = EphemeralState::init(&config)
        .await
        .expect("unreachable remote is not fatal");
    assert_eq!(state.cache().backend_mode(), BackendMode::FallbackOnly);

    assert!(state.cache().set("k", "v", None).await);
    assert_eq!(state.cache().get("k").await, Some("v".to_string()));

    let health = state.health().await;
    assert_eq!(health.status, HealthStatus::Degraded);
    assert!(health.remote_error.is_some());
    assert_eq!(health.fallback_entries, 1);
}

#[tokio::test]
async fn test_init_rejects_invalid_config() {
    let config = ConfigBuilder::new().with_rpm(0).build();
    assert!(EphemeralState::init(&config).await.is_err());
}

#[tokio::test]
async fn test_health_follows_remote_availability() {
    let (state, remote) = memory_state(AppConfig::default());
    let health = state.health().await;
    assert_eq!(health.status, HealthStatus::Up);
    assert!(health.remote_latency_ms.is_some());
    assert_eq!(health.rate_limiter, "distributed");

    remote.set_available(false);
    let health = state.health().await;
    assert_eq!(health.status, HealthStatus::Degraded);
    assert!(health.remote_latency_ms.is_none());
    assert_eq!(
        health.mode,
        BackendMode::Remote {
            provider: "memory".to_string()
        }
    );
}

#[tokio::test]
async fn test_health_reports_counters() {
    let state = fallback_state(AppConfig::default());
    state.cache().set("k", "v", None).await;
    state.cache().get("k").await;
    state.cache().get("missing").await;

    let health = state.health().await;
    assert_eq!(health.metrics.hits, 1);
    assert_eq!(health.metrics.misses, 1);
    assert_eq!(health.hit_rate, 0.5);

    let json = serde_json::to_value(&health).expect("report serializes");
    assert_eq!(json["status"], "up");
    assert_eq!(json["mode"]["mode"], "fallback_only");
}

#[tokio::test]
async fn test_shutdown_returns_final_counters() {
    let state = fallback_state(AppConfig::default());
    state.cache().set("k", "v", None).await;
    state.cache().get("k").await;
    state.cache().delete("k").await;

    let snapshot = state.shutdown();
    assert_eq!(snapshot.sets, 1);
    assert_eq!(snapshot.hits, 1);
    assert_eq!(snapshot.deletes, 1);
}

#[test]
fn test_blocking_facade_shares_state_with_async_callers() {
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let state = fallback_state(ConfigBuilder::new().with_rpm(1).build());
    let blocking = state.blocking(runtime.handle().clone());

    assert!(blocking.set("predict:m3:a", "0.7", None));
    assert_eq!(
        runtime.block_on(state.cache().get("predict:m3:a")),
        Some("0.7".to_string())
    );

    runtime.block_on(state.cache().set("context:m3:a", "{}", None));
    assert_eq!(blocking.get("context:m3:a"), Some("{}".to_string()));

    let report = blocking.purge_model_artifact("m3");
    assert_eq!(report.total_removed(), 2);
    assert_eq!(runtime.block_on(state.cache().get("predict:m3:a")), None);

    assert!(blocking.acquire("k", 1, Duration::ZERO));
    assert!(!runtime.block_on(state.rate_limiter().try_acquire("k", 1)));
}

#[test]
fn test_blocking_facade_from_worker_thread() {
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let state = fallback_state(AppConfig::default());
    let blocking = state.blocking(runtime.handle().clone());

    let writer = std::thread::spawn(move || {
        blocking.set_as("summary:team:DEN", &57u32, None);
        blocking.delete_prefix("summary:")
    });
    assert_eq!(writer.join().expect("writer panicked"), 1);
    assert!(state.cache().fallback().is_empty());
}
