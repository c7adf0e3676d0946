//! Error types for Opdeck
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Opdeck operations
///
/// This enum encompasses all possible errors that can occur during
/// session handling, storage access, form validation, and the mock
/// responder/registry paths.
#[derive(Error, Debug)]
pub enum OpdeckError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Form validation errors (missing fields, bad email, short password)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication and session errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A protected command was invoked without a session
    #[error("Not logged in. Run `opdeck login <username-or-email>` first")]
    LoginRequired,

    /// A command requires the admin role
    #[error("Admin access required")]
    AdminRequired,

    /// An entity lookup by id came up empty
    #[error("Not found: {0}")]
    NotFound(String),

    /// The mock registry was used before an API key/url was configured
    #[error("No API key configured. Run `opdeck apikey set` first")]
    ApiKeyMissing,

    /// A pending mock reply was cancelled before it resolved
    #[error("Reply cancelled")]
    Cancelled,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Store errors (database operations)
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for Opdeck operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
