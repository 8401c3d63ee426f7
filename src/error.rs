//! Error types for orderdesk
//!
//! This module defines the error hierarchy used throughout the crate.
//! We use `thiserror` for library-style errors with clear error chains.

use std::io;

/// Main error type for the orderdesk programs
#[derive(Debug, thiserror::Error)]
pub enum OrderdeskError {
    /// Database-related errors
    #[error("{0}")]
    Database(#[from] DbError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The user asked to leave (`q` at a prompt, or stdin closed)
    #[error("Session ended by user")]
    Quit,
}

/// Database operation errors
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The server refused the supplied credentials
    #[error("Authentication rejected: {0}")]
    AuthRejected(String),

    /// Failed to establish connection
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A named access-layer operation failed inside the driver
    #[error("*** ServerException in {op}: {message}")]
    OperationFailed { op: &'static str, message: String },

    /// Table or collection name outside the known set
    #[error("Unknown table: {0}")]
    UnknownTable(String),
}

impl DbError {
    /// Wrap a driver failure for the named operation
    pub fn operation(op: &'static str, err: impl std::fmt::Display) -> Self {
        DbError::OperationFailed {
            op,
            message: err.to_string(),
        }
    }

    /// Whether the login loop should ask for credentials again
    pub fn is_retryable_login(&self) -> bool {
        matches!(
            self,
            DbError::AuthRejected(_) | DbError::ConnectionFailed(_)
        )
    }
}

/// Configuration loading/parsing errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Home directory not found
    #[error("Could not determine home directory")]
    NoHomeDir,

    /// Config file could not be read
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// Failed to parse TOML
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Specialized Result type for orderdesk operations
pub type Result<T> = std::result::Result<T, OrderdeskError>;

/// Specialized Result type for database operations
pub type DbResult<T> = std::result::Result<T, DbError>;

/// Specialized Result type for config operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
