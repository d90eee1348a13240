//! Configuration loader
//!
//! Handles loading configuration from defaults, a TOML file and environment
//! variables, then validates the result before anything is constructed
//! from it.

use crate::config::AppConfig;
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use courtside_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default location found)
    /// 3. `REDIS_URL`, as an alias for `cache.redis_url`
    /// 4. Prefixed environment variables (e.g., `COURTSIDE__CACHE__REDIS_URL`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment
            .merge(
                Env::raw()
                    .only(&[REDIS_URL_ENV])
                    .map(|_| "cache.redis_url".into()),
            )
            .merge(
                Env::prefixed(&format!("{}{}", self.env_prefix, CONFIG_ENV_SEPARATOR))
                    .split(CONFIG_ENV_SEPARATOR),
            );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Every section is checked before any backend is constructed.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_cache_config(config)?;
    validate_rate_limit_config(config)?;
    validate_logging_config(config)?;
    Ok(())
}

fn validate_cache_config(config: &AppConfig) -> Result<()> {
    let cache = &config.cache;
    if cache.default_ttl_secs == 0 {
        return Err(Error::configuration("Cache default TTL cannot be 0"));
    }
    if cache.operation_timeout_ms == 0 {
        return Err(Error::configuration("Cache operation timeout cannot be 0"));
    }
    if cache.connect_timeout_ms == 0 {
        return Err(Error::configuration("Cache connect timeout cannot be 0"));
    }
    if cache.scan_batch_size == 0 {
        return Err(Error::configuration("Cache scan batch size cannot be 0"));
    }
    Ok(())
}

fn validate_rate_limit_config(config: &AppConfig) -> Result<()> {
    let rate_limit = &config.rate_limit;
    if rate_limit.default_rpm == 0 {
        return Err(Error::configuration(
            "Rate limit requests per minute cannot be 0",
        ));
    }
    if rate_limit.retry_interval_ms == 0 {
        return Err(Error::configuration("Rate limit retry interval cannot be 0"));
    }
    if rate_limit.bucket_idle_expiry_secs == 0 {
        return Err(Error::configuration("Bucket idle expiry cannot be 0"));
    }
    if rate_limit.key_prefix.is_empty() {
        return Err(Error::configuration("Rate limit key prefix cannot be empty"));
    }
    Ok(())
}

fn validate_logging_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level).map(|_| ())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the remote backend URL
    pub fn with_redis_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.cache.redis_url = Some(url.into());
        self
    }

    /// Set cache configuration
    pub fn with_cache(mut self, cache: crate::config::CacheConfig) -> Self {
        self.config.cache = cache;
        self
    }

    /// Set the bucket capacity in requests per minute
    pub fn with_rpm(mut self, rpm: u32) -> Self {
        self.config.rate_limit.default_rpm = rpm;
        self
    }

    /// Set rate limit configuration
    pub fn with_rate_limit(mut self, rate_limit: crate::config::RateLimitConfig) -> Self {
        self.config.rate_limit = rate_limit;
        self
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: crate::config::LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}
