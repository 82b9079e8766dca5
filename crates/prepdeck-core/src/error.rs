//! Core error types for prepdeck-core.
//!
//! This module defines the error hierarchy using thiserror. All engine
//! errors fail fast: the operation aborts before any state mutation is
//! computed, and no error is swallowed inside the core.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for prepdeck-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Scheduling engine errors
    #[error("Scheduling error: {0}")]
    Srs(#[from] SrsError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors reported by the SM-2 engine.
#[derive(Error, Debug)]
pub enum SrsError {
    /// Recall score outside the 0-5 scale
    #[error("score {score} is out of range, expected 0-5")]
    InvalidScore { score: u8 },

    /// A review state violating an invariant is rejected rather than
    /// silently repaired, to surface upstream corruption early.
    #[error("invalid review state: {reason}")]
    InvalidState { reason: String },
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// No problem with the given id
    #[error("No problem with id {0}")]
    ProblemNotFound(i64),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
