//! Error types for wsprune.
//!
//! Uses thiserror for derive macros. Configuration problems are separated from
//! everything else so `main` can report the right exit code.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for wsprune operations.
#[derive(Error, Debug)]
pub enum SweepError {
    /// Options, arguments or the config file are unusable. Raised before any
    /// workspace is touched.
    #[error("{0}")]
    InvalidConfiguration(String),

    /// The workspace service rejected or failed a request.
    #[error("Workspace service error: {0}")]
    Service(String),

    /// A local filesystem operation failed.
    #[error("Filesystem error: {0}")]
    Filesystem(String),

    /// Reading from or writing to the interactive console failed.
    #[error("Console error: {0}")]
    Interactive(String),
}

impl SweepError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SweepError::InvalidConfiguration(_) => exit_codes::INVALID_CONFIGURATION,
            SweepError::Service(_) => exit_codes::UNHANDLED_ERROR,
            SweepError::Filesystem(_) => exit_codes::UNHANDLED_ERROR,
            SweepError::Interactive(_) => exit_codes::UNHANDLED_ERROR,
        }
    }

    /// Build a filesystem error that names the path involved.
    pub fn filesystem(action: &str, path: &std::path::Path, err: std::io::Error) -> Self {
        SweepError::Filesystem(format!("failed to {} '{}': {}", action, path.display(), err))
    }
}

/// Result type alias for wsprune operations.
pub type Result<T> = std::result::Result<T, SweepError>;
