//! Error types and handling for pagenav core

use thiserror::Error;

/// Result type alias for pagenav operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type a page setup procedure may fail with
pub type SetupError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for pagenav core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Navigator errors
    #[error("Navigator error: {0}")]
    Navigator(#[from] NavigatorError),

    /// Template loading errors
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Persistent store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },
}

/// Navigator errors
#[derive(Error, Debug)]
pub enum NavigatorError {
    #[error("No pages registered")]
    NoPages,

    #[error("Landing page '{0}' not found in registry")]
    LandingPageMissing(String),

    #[error("Content area '{0}' not found in document")]
    ContentAreaMissing(String),

    #[error("Navigator already initialized")]
    AlreadyInitialized,

    #[error("Navigator not initialized")]
    NotInitialized,

    #[error("Navigator event loop is already running")]
    EventLoopBusy,

    #[error("Setup of page '{page}' failed: {source}")]
    Setup {
        page: String,
        #[source]
        source: SetupError,
    },
}

/// Template loading errors
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {path}")]
    NotFound { path: String },

    #[error("Failed to load {path}: HTTP {status}")]
    Http { path: String, status: u16 },

    #[error("Failed to load {path}: {message}")]
    Network { path: String, message: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid template base: {base}")]
    InvalidBase { base: String },
}

/// Persistent store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Value stored under '{key}' is not a record collection")]
    InvalidCollection { key: String },
}
