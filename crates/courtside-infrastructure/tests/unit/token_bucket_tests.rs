//! Token bucket tests

use crate::test_utils::{config_with_rpm, failing_state, fallback_state, memory_state};
use courtside_infrastructure::TokenBucket;
use courtside_infrastructure::cache::RemoteHandle;
use courtside_infrastructure::config::{ConfigBuilder, RateLimitConfig};
use courtside_infrastructure::utils::ManualClock;
use courtside_providers::testing::{FailingRemoteBackend, MemoryRemoteBackend};
use std::sync::Arc;
use std::time::{Duration, Instant};

async fn concurrent_successes(limiter: &TokenBucket, callers: usize, timeout: Duration) -> usize {
    let tasks: Vec<_> = (0..callers)
        .map(|_| {
            let limiter = limiter.clone();
            tokio::spawn(async move { limiter.acquire("batch:client-1", 1, timeout).await })
        })
        .collect();

    let mut granted = 0;
    for task in tasks {
        if task.await.expect("acquire task panicked") {
            granted += 1;
        }
    }
    granted
}

fn manual_limiter(remote: &RemoteHandle, rpm: u32, clock: Arc<ManualClock>) -> TokenBucket {
    let config = RateLimitConfig {
        default_rpm: rpm,
        ..RateLimitConfig::default()
    };
    TokenBucket::new(remote, &config, clock)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_rpm_admits_two_of_six_concurrent_callers() {
    let state = fallback_state(config_with_rpm(2));
    let granted =
        concurrent_successes(state.rate_limiter(), 6, Duration::from_millis(200)).await;
    assert_eq!(granted, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_rpm_admits_two_of_six_with_distributed_buckets() {
    let (state, _remote) = memory_state(config_with_rpm(2));
    assert_eq!(state.rate_limiter().realization(), "distributed");
    let granted =
        concurrent_successes(state.rate_limiter(), 6, Duration::from_millis(200)).await;
    assert_eq!(granted, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_more_callers_than_capacity_admits_exactly_capacity() {
    for (label, state) in [
        ("local", fallback_state(config_with_rpm(10))),
        ("distributed", memory_state(config_with_rpm(10)).0),
    ] {
        let granted = concurrent_successes(state.rate_limiter(), 25, Duration::ZERO).await;
        assert_eq!(granted, 10, "{}", label);
    }
}

#[tokio::test]
async fn test_refill_after_sixty_over_rate_seconds() {
    let clock = Arc::new(ManualClock::new(1_000.0));
    let limiter = manual_limiter(&RemoteHandle::Unavailable, 60, clock.clone());

    for _ in 0..60 {
        assert!(limiter.try_acquire("k", 1).await);
    }
    assert!(!limiter.try_acquire("k", 1).await);

    clock.advance(1.0);
    assert!(limiter.try_acquire("k", 1).await);
    assert!(!limiter.try_acquire("k", 1).await);
}

#[tokio::test]
async fn test_refill_is_capped_at_capacity() {
    let clock = Arc::new(ManualClock::new(0.0));
    let limiter = manual_limiter(&RemoteHandle::Unavailable, 3, clock.clone());

    assert!(limiter.try_acquire("k", 3).await);
    clock.advance(3_600.0);
    assert!(limiter.try_acquire("k", 3).await);
    assert!(!limiter.try_acquire("k", 1).await);
}

#[tokio::test]
async fn test_clock_moving_backwards_never_removes_tokens() {
    let clock = Arc::new(ManualClock::new(500.0));
    let limiter = manual_limiter(&RemoteHandle::Unavailable, 2, clock.clone());

    assert!(limiter.try_acquire("k", 1).await);
    clock.set(100.0);
    assert!(limiter.try_acquire("k", 1).await);
    assert!(!limiter.try_acquire("k", 1).await);
}

#[tokio::test]
async fn test_local_and_distributed_limiters_agree() {
    let local_clock = Arc::new(ManualClock::new(0.0));
    let remote_clock = Arc::new(ManualClock::new(0.0));
    let local = manual_limiter(&RemoteHandle::Unavailable, 4, local_clock.clone());
    let distributed = manual_limiter(
        &RemoteHandle::connected(Arc::new(MemoryRemoteBackend::new())),
        4,
        remote_clock.clone(),
    );

    for (advance, amount) in [(0.0, 2), (0.0, 2), (0.0, 1), (10.0, 1), (5.0, 1), (60.0, 4)] {
        local_clock.advance(advance);
        remote_clock.advance(advance);
        assert_eq!(
            local.try_acquire("k", amount).await,
            distributed.try_acquire("k", amount).await,
            "advance={} amount={}",
            advance,
            amount
        );
    }
}

#[tokio::test]
async fn test_failing_distributed_attempt_uses_local_bucket() {
    let (state, remote) = failing_state(config_with_rpm(2));
    let limiter = state.rate_limiter();
    assert!(limiter.try_acquire("k", 1).await);
    assert!(limiter.try_acquire("k", 1).await);
    assert!(!limiter.try_acquire("k", 1).await);
    assert_eq!(remote.calls(), 3);
}

#[tokio::test]
async fn test_outage_mid_flight_switches_realization() {
    let remote = Arc::new(MemoryRemoteBackend::new());
    let clock = Arc::new(ManualClock::new(0.0));
    let limiter = manual_limiter(&RemoteHandle::connected(remote.clone()), 2, clock);

    assert!(limiter.try_acquire("k", 1).await);
    assert!(limiter.try_acquire("k", 1).await);
    assert!(!limiter.try_acquire("k", 1).await);

    // The local bucket for the same key is independent and starts full
    remote.set_available(false);
    assert!(limiter.try_acquire("k", 1).await);

    remote.set_available(true);
    assert!(!limiter.try_acquire("k", 1).await);
}

#[tokio::test]
async fn test_acquire_waits_for_refill_within_timeout() {
    let state = fallback_state(config_with_rpm(600));
    let limiter = state.rate_limiter();
    while limiter.try_acquire("hot", 1).await {}
    assert!(limiter.acquire("hot", 1, Duration::from_secs(2)).await);
}

#[tokio::test]
async fn test_unbounded_timeout_waits_for_refill() {
    let state = fallback_state(config_with_rpm(600));
    let limiter = state.rate_limiter();
    while limiter.try_acquire("hot", 1).await {}
    assert!(limiter.acquire("hot", 1, Duration::MAX).await);
}

#[tokio::test]
async fn test_acquire_default_uses_configured_deadline() {
    let config = ConfigBuilder::new()
        .with_rate_limit(RateLimitConfig {
            default_rpm: 1,
            default_acquire_timeout_ms: 100,
            ..RateLimitConfig::default()
        })
        .build();
    let state = fallback_state(config);
    let limiter = state.rate_limiter();
    assert!(limiter.acquire_default("k", 1).await);

    let started = Instant::now();
    assert!(!limiter.acquire_default("k", 1).await);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(80), "{:?}", elapsed);
    assert!(elapsed < Duration::from_millis(500), "{:?}", elapsed);
}

#[tokio::test]
async fn test_acquire_never_sleeps_past_deadline() {
    let state = fallback_state(config_with_rpm(1));
    let limiter = state.rate_limiter();
    assert!(limiter.try_acquire("k", 1).await);

    let timeout = Duration::from_millis(120);
    let started = Instant::now();
    assert!(!limiter.acquire("k", 1, timeout).await);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(100), "{:?}", elapsed);
    assert!(elapsed < Duration::from_millis(500), "{:?}", elapsed);
}

#[tokio::test]
async fn test_zero_timeout_makes_single_attempt() {
    let config = ConfigBuilder::new()
        .with_rate_limit(RateLimitConfig {
            default_rpm: 1,
            retry_interval_ms: 10_000,
            ..RateLimitConfig::default()
        })
        .build();
    let state = fallback_state(config);
    let limiter = state.rate_limiter();
    assert!(limiter.acquire("k", 1, Duration::ZERO).await);

    let started = Instant::now();
    assert!(!limiter.acquire("k", 1, Duration::ZERO).await);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_amount_above_capacity_fails_without_waiting() {
    let config = ConfigBuilder::new()
        .with_rate_limit(RateLimitConfig {
            default_rpm: 5,
            retry_interval_ms: 10_000,
            ..RateLimitConfig::default()
        })
        .build();
    let state = fallback_state(config);

    let started = Instant::now();
    assert!(
        !state
            .rate_limiter()
            .acquire("k", 6, Duration::from_secs(10))
            .await
    );
    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(state.rate_limiter().try_acquire("k", 5).await);
}

#[tokio::test]
async fn test_with_rate_overrides_capacity() {
    let state = fallback_state(config_with_rpm(60));
    let strict = state.rate_limiter().with_rate(1);
    assert_eq!(strict.rate(), 1.0);
    assert!(strict.try_acquire("strict:k", 1).await);
    assert!(!strict.try_acquire("strict:k", 1).await);
    assert!(state.rate_limiter().try_acquire("loose:k", 1).await);
}

#[tokio::test]
async fn test_distributed_bucket_stored_under_namespace() {
    let remote = Arc::new(MemoryRemoteBackend::new());
    let clock = Arc::new(ManualClock::new(0.0));
    let limiter = manual_limiter(&RemoteHandle::connected(remote.clone()), 5, clock);
    assert!(limiter.try_acquire("ip:10.0.0.1", 2).await);

    let bucket = remote
        .bucket("ratelimit:ip:10.0.0.1")
        .expect("bucket stored remotely");
    assert_eq!(bucket.tokens, 3.0);
}

#[tokio::test]
async fn test_failing_backend_reports_distributed_realization() {
    let remote = RemoteHandle::connected(Arc::new(FailingRemoteBackend::new()));
    let limiter = manual_limiter(&remote, 1, Arc::new(ManualClock::new(0.0)));
    assert_eq!(limiter.realization(), "distributed");
    assert!(limiter.try_acquire("k", 1).await);
}
