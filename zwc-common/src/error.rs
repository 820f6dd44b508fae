//! Common error types for the web configurator

use std::time::Duration;
use thiserror::Error;

/// Common result type for configurator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the configurator crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// External program exited unsuccessfully or could not be started
    #[error("Command '{program}' failed: {reason}")]
    CommandFailed { program: String, reason: String },

    /// External program did not finish within its time budget
    #[error("Command '{program}' timed out after {timeout:?}")]
    CommandTimeout { program: String, timeout: Duration },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
