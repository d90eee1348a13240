//! Configuration loader tests
//!
//! Environment and working-directory changes are confined to figment's
//! `Jail`, which serializes the tests that use it and restores the process
//! environment afterwards.

use courtside_domain::error::Error;
use courtside_infrastructure::config::{AppConfig, CacheConfig, ConfigLoader};
use courtside_infrastructure::constants::{CACHE_SCAN_BATCH_SIZE, RATE_LIMIT_DEFAULT_RPM};
use figment::Jail;

fn load(loader: ConfigLoader) -> Result<AppConfig, figment::Error> {
    loader.load().map_err(|e| e.to_string().into())
}

#[test]
fn test_defaults_without_file_or_env() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let config = load(ConfigLoader::new())?;
        assert_eq!(config.cache.redis_url, None);
        assert_eq!(config.cache.default_ttl_secs, 300);
        assert_eq!(config.cache.scan_batch_size, CACHE_SCAN_BATCH_SIZE);
        assert_eq!(config.rate_limit.default_rpm, RATE_LIMIT_DEFAULT_RPM);
        assert_eq!(config.rate_limit.retry_interval_ms, 50);
        assert_eq!(config.rate_limit.bucket_idle_expiry_secs, 120);
        assert_eq!(config.rate_limit.key_prefix, "ratelimit");
        assert_eq!(config.logging.level, "info");
        Ok(())
    });
}

#[test]
fn test_file_in_working_directory_is_discovered() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_file(
            "courtside.toml",
            r#"
                [cache]
                default_ttl_secs = 120

                [rate_limit]
                default_rpm = 30
            "#,
        )?;
        let config = load(ConfigLoader::new())?;
        assert_eq!(config.cache.default_ttl_secs, 120);
        assert_eq!(config.rate_limit.default_rpm, 30);
        assert_eq!(config.cache.operation_timeout_ms, 500);
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_file(
            "custom.toml",
            r#"
                [rate_limit]
                default_rpm = 30
            "#,
        )?;
        jail.set_env("COURTSIDE__RATE_LIMIT__DEFAULT_RPM", "90");
        jail.set_env("COURTSIDE__LOGGING__JSON_FORMAT", "true");

        let config = load(ConfigLoader::new().with_config_path("custom.toml"))?;
        assert_eq!(config.rate_limit.default_rpm, 90);
        assert!(config.logging.json_format);
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_uses_defaults() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let config = load(ConfigLoader::new().with_config_path("does-not-exist.toml"))?;
        assert_eq!(config.rate_limit.default_rpm, RATE_LIMIT_DEFAULT_RPM);
        Ok(())
    });
}

#[test]
fn test_redis_url_alias() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("REDIS_URL", "redis://cache.internal:6379");
        let config = load(ConfigLoader::new())?;
        assert_eq!(
            config.cache.remote_url(),
            Some("redis://cache.internal:6379")
        );

        jail.set_env("COURTSIDE__CACHE__REDIS_URL", "redis://primary:6379");
        let config = load(ConfigLoader::new())?;
        assert_eq!(config.cache.remote_url(), Some("redis://primary:6379"));
        Ok(())
    });
}

#[test]
fn test_custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("NBA__RATE_LIMIT__DEFAULT_RPM", "15");
        let config = load(ConfigLoader::new().with_env_prefix("NBA"))?;
        assert_eq!(config.rate_limit.default_rpm, 15);
        Ok(())
    });
}

#[test]
fn test_zero_rpm_is_rejected() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("COURTSIDE__RATE_LIMIT__DEFAULT_RPM", "0");
        let err = ConfigLoader::new().load().expect_err("rpm 0 is invalid");
        assert!(matches!(err, Error::Configuration { .. }));
        Ok(())
    });
}

#[test]
fn test_zero_scan_batch_is_rejected() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("COURTSIDE__CACHE__SCAN_BATCH_SIZE", "0");
        assert!(ConfigLoader::new().load().is_err());
        Ok(())
    });
}

#[test]
fn test_unknown_log_level_is_rejected() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("COURTSIDE__LOGGING__LEVEL", "chatty");
        let err = ConfigLoader::new().load().expect_err("unknown level");
        assert!(err.to_string().contains("chatty"));
        Ok(())
    });
}

#[test]
fn test_malformed_value_is_a_configuration_error() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("COURTSIDE__CACHE__DEFAULT_TTL_SECS", "soon");
        let err = ConfigLoader::new().load().expect_err("not a number");
        assert!(matches!(err, Error::Configuration { .. }));
        Ok(())
    });
}

#[test]
fn test_saved_config_loads_back() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
        let path = dir.path().join("courtside.toml");

        let mut config = AppConfig::default();
        config.cache.redis_url = Some("redis://saved:6379".to_string());
        config.rate_limit.default_rpm = 42;
        ConfigLoader::new()
            .save_to_file(&config, &path)
            .map_err(|e| e.to_string())?;

        let loaded = load(ConfigLoader::new().with_config_path(&path))?;
        assert_eq!(loaded.cache.remote_url(), Some("redis://saved:6379"));
        assert_eq!(loaded.rate_limit.default_rpm, 42);
        Ok(())
    });
}

#[test]
fn test_blank_redis_url_means_fallback_only() {
    let cache = CacheConfig {
        redis_url: Some("   ".to_string()),
        ..CacheConfig::default()
    };
    assert_eq!(cache.remote_url(), None);
}
