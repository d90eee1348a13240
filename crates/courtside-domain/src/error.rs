//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by the contextual variants
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the ephemeral-state subsystem
///
/// The three remote-facing variants (`RemoteUnavailable`, `RemoteProtocol`,
/// `Decode`) never reach callers of the cache or the rate limiter: the
/// infrastructure layer turns them into a fallback branch and a log line.
#[derive(Error, Debug)]
pub enum Error {
    /// The distributed backend could not be reached (connection, timeout)
    #[error("Remote backend unavailable: {message}")]
    RemoteUnavailable {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// The distributed backend answered with something unusable
    /// (malformed reply, script failure)
    #[error("Remote protocol error: {message}")]
    RemoteProtocol {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// A payload was not in its expected serialized form
    #[error("Decode error: {message}")]
    Decode {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Remote error creation methods
impl Error {
    /// Create a remote-unavailable error
    pub fn remote_unavailable<S: Into<String>>(message: S) -> Self {
        Self::RemoteUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create a remote-unavailable error with source
    pub fn remote_unavailable_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::RemoteUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a remote protocol error
    pub fn remote_protocol<S: Into<String>>(message: S) -> Self {
        Self::RemoteProtocol {
            message: message.into(),
            source: None,
        }
    }

    /// Create a remote protocol error with source
    pub fn remote_protocol_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::RemoteProtocol {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Decode error creation methods
impl Error {
    /// Create a decode error
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
            source: None,
        }
    }

    /// Create a decode error with source
    pub fn decode_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration and I/O error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Classification
impl Error {
    /// True for failures that originate on the distributed backend path
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::RemoteUnavailable { .. } | Self::RemoteProtocol { .. } | Self::Decode { .. }
        )
    }

    /// Short machine-readable label used in structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RemoteUnavailable { .. } => "remote_unavailable",
            Self::RemoteProtocol { .. } => "remote_protocol",
            Self::Decode { .. } => "decode",
            Self::Configuration { .. } => "configuration",
            Self::Io { .. } => "io",
            Self::Json { .. } => "json",
            Self::Internal { .. } => "internal",
        }
    }
}
