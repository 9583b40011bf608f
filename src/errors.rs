//! Error types for Radar Viewer
//!
//! Each component has its own error enum so that callers can match on the
//! failure that matters to them. Everything converges on [`AppError`] at the
//! session and CLI level.

use std::path::PathBuf;
use thiserror::Error;

/// Remote fetch errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// Server refused the request, even after retrying with a browser identity
    #[error("Access denied: {url}")]
    AccessDenied { url: String },

    /// Remote resource does not exist
    #[error("Resource not found: {url}")]
    NotFound { url: String },

    /// Server returned some other non-success status
    #[error("Server error for {url}: HTTP {status}")]
    ServerError { url: String, status: u16 },

    /// Transport level failure
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// URL could not be built or uses an unsupported scheme
    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Body is not valid text in the requested encoding
    #[error("Response from {url} is not valid {encoding}")]
    Decode { url: String, encoding: &'static str },

    /// Unknown character encoding label
    #[error("Unsupported character encoding: {label}")]
    UnsupportedEncoding { label: String },

    /// Writing the downloaded content failed
    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Asset retrieval errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// A layer could not be fetched, so the composite cannot be shown
    #[error("Asset unavailable: {url}")]
    Unavailable {
        url: String,
        #[source]
        source: FetchError,
    },
}

/// Catalog store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite failure
    #[error("Catalog database error")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored log timestamp is not in `YYYY-MM-DD HH:MM:SS` form
    #[error("Invalid timestamp in event log: {value}")]
    InvalidTimestamp { value: String },
}

/// Radar index errors
#[derive(Error, Debug)]
pub enum IndexError {
    /// The cached index file is missing or unreadable
    #[error("Radar index not readable: {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Report viewer errors
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The report path is not an existing `.html` file
    #[error("Local file '{}' is not valid: {reason}", .file.display())]
    LocalHtmlInvalid { file: PathBuf, reason: String },

    /// Every platform open command failed
    #[error("Local file '{}' is not valid: open failed. Exit codes: {attempts:?}", .file.display())]
    LaunchFailed {
        file: PathBuf,
        attempts: Vec<String>,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// No per-user configuration directory on this platform
    #[error("Could not determine user config directory")]
    NoConfigDir,
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Viewer(#[from] ViewerError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
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

    /// Whether repeating the same user action might succeed
    pub fn is_recoverable(&self) -> bool {
        fn transient(error: &FetchError) -> bool {
            matches!(error, FetchError::Http(_) | FetchError::ServerError { .. })
        }

        match self {
            AppError::Fetch(error) => transient(error),
            AppError::Asset(AssetError::Unavailable { source, .. }) => transient(source),
            _ => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Fetch(_) => "fetch",
            AppError::Asset(_) => "asset",
            AppError::Store(_) => "store",
            AppError::Index(_) => "index",
            AppError::Viewer(_) => "viewer",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Store result type alias
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Viewer result type alias
pub type ViewerResult<T> = std::result::Result<T, ViewerError>;

/// Config result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
