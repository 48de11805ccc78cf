//! Error types for the Magazine Store reconciler
//!
//! Errors are split by the layer that raises them. `ApiError` covers every
//! failure of a single remote call and is fatal to the current pass.
//! `ConfigError` covers loading and validating settings. `AppError` wraps
//! both for the pipeline entry point and the CLI.
//!
//! An unresolved magazine id is not an error anywhere in this taxonomy; the
//! coverage matcher treats it as a missing magazine.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single call to the remote catalog service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Server answered with a non-success status
    #[error("HTTP {status} from endpoint {endpoint}")]
    Transport { status: u16, endpoint: String },

    /// Request never produced a response (DNS, connect, timeout, reset)
    #[error("Request to {endpoint} failed")]
    Connection {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body does not match the expected shape
    #[error("Response from {endpoint} could not be decoded: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Request body could not be serialized
    #[error("Request body could not be encoded")]
    Encode(#[source] serde_json::Error),

    /// HTTP client could not be constructed from the configuration
    #[error("HTTP client could not be built: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Endpoint path could not be joined onto the base URL
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// A category worker panicked or was aborted before reporting
    #[error("Fetch worker for category '{category}' failed: {reason}")]
    WorkerFailed { category: String, reason: String },
}

impl ApiError {
    /// True for failures that happened on the wire rather than in decoding
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Connection { .. })
    }

    /// Endpoint involved in the failure, when one is known
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Transport { endpoint, .. }
            | Self::Connection { endpoint, .. }
            | Self::Decode { endpoint, .. } => Some(endpoint),
            Self::InvalidUrl { url, .. } => Some(url),
            Self::Encode(_) | Self::ClientBuild(_) | Self::WorkerFailed { .. } => None,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format in {path}: {source}")]
    InvalidFormat {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration could not be rendered as TOML
    #[error("Configuration could not be serialized")]
    Serialize(#[from] toml::ser::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Config file already exists and --force was not given
    #[error("Configuration file already exists: {path}. Use --force to overwrite")]
    AlreadyExists { path: PathBuf },

    /// No user config directory on this platform
    #[error("Could not determine user config directory")]
    NoConfigDir,

    /// File I/O error while reading or writing configuration
    #[error("Configuration file I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    /// Remote call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error (terminal interaction)
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Api(e) if e.is_transport() => "transport",
            AppError::Api(ApiError::Decode { .. }) => "decode",
            AppError::Api(_) => "api",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Remote call result type alias
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
