//! Remote backend handle
//!
//! The remote backend is either connected or explicitly unavailable. The
//! handle is decided once at construction and injected into every consumer.

use crate::config::CacheConfig;
use courtside_domain::ports::RemoteBackend;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Connected remote backend, or the explicit absence of one
#[derive(Debug, Clone)]
pub enum RemoteHandle {
    /// A reachable distributed backend
    Connected(Arc<dyn RemoteBackend>),
    /// No distributed backend; every operation uses the fallback path
    Unavailable,
}

impl RemoteHandle {
    /// Wrap a backend as connected
    pub fn connected(backend: Arc<dyn RemoteBackend>) -> Self {
        Self::Connected(backend)
    }

    /// Connect to the backend named by `config`
    ///
    /// Never fails: a missing URL, a build without Redis support or a failed
    /// connection all yield [`RemoteHandle::Unavailable`] with a log line.
    pub async fn connect(config: &CacheConfig) -> Self {
        let Some(url) = config.remote_url() else {
            info!("No remote cache URL configured, running fallback-only");
            return Self::Unavailable;
        };
        Self::connect_url(url, config).await
    }

    #[cfg(feature = "cache-redis")]
    async fn connect_url(url: &str, config: &CacheConfig) -> Self {
        use courtside_providers::cache::RedisRemoteBackend;

        match RedisRemoteBackend::connect(url, config.connect_timeout(), config.operation_timeout())
            .await
        {
            Ok(backend) => {
                info!(
                    server = backend.server_address(),
                    "Connected to remote cache backend"
                );
                Self::Connected(Arc::new(backend))
            }
            Err(e) => {
                warn!(
                    kind = e.kind(),
                    error = %e,
                    "Remote cache backend unreachable, running fallback-only"
                );
                Self::Unavailable
            }
        }
    }

    #[cfg(not(feature = "cache-redis"))]
    async fn connect_url(_url: &str, _config: &CacheConfig) -> Self {
        warn!("Remote cache URL configured but built without Redis support, running fallback-only");
        Self::Unavailable
    }

    /// The backend, when connected
    pub fn backend(&self) -> Option<&Arc<dyn RemoteBackend>> {
        match self {
            Self::Connected(backend) => Some(backend),
            Self::Unavailable => None,
        }
    }

    /// Check if a remote backend is connected
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    /// Backend mode implied by this handle
    pub fn mode(&self) -> BackendMode {
        match self {
            Self::Connected(backend) => BackendMode::Remote {
                provider: backend.provider_name().to_string(),
            },
            Self::Unavailable => BackendMode::FallbackOnly,
        }
    }
}

/// Which backend the cache prefers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BackendMode {
    /// Remote first, fallback on failure
    Remote {
        /// Remote provider name
        provider: String,
    },
    /// Fallback store only
    FallbackOnly,
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote { provider } => write!(f, "remote ({})", provider),
            Self::FallbackOnly => f.write_str("fallback-only"),
        }
    }
}
