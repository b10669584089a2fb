//! Error types for the accounts storage service
//!
//! This module provides a unified error handling system shared by the storage
//! backends, the service layer and the HTTP gateway. Every repository operation
//! reports one of a small set of categories: not found, cancelled, backend
//! failure or validation failure.

use std::fmt::Display;
use thiserror::Error;

/// Accounts storage error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error when an account cannot be found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// The operation context was cancelled or its deadline passed
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// Generic validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Database error, with the driver error kept as its source
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: sqlx::Error,
    },
}

impl From<sqlx::Error> for Error {
    fn from(source: sqlx::Error) -> Self {
        Error::Database {
            message: source.to_string(),
            source,
        }
    }
}

impl Error {
    /// Whether this error means the requested record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::AccountNotFound(_))
    }

    /// Whether this error came from a cancelled or expired context
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::AccountNotFound(msg) => Error::AccountNotFound(format!("{}: {}", context, msg)),
                Error::Cancelled(msg) => Error::Cancelled(format!("{}: {}", context, msg)),
                Error::ValidationError(msg) => Error::ValidationError(format!("{}: {}", context, msg)),
                Error::ConfigurationError(msg) => Error::ConfigurationError(format!("{}: {}", context, msg)),
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
                Error::Database { message, source } => Error::Database {
                    message: format!("{}: {}", context, message),
                    source,
                },
            }
        })
    }
}
