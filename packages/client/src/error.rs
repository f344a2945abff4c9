//! Error types for the study room client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Room or user identity rejected before connecting
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors from parsing an interactive input line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    /// Slash command not recognized
    #[error("Unknown command: /{0} (try /help)")]
    UnknownCommand(String),

    /// Duration argument is not a whole number of minutes
    #[error("Duration must be a whole number of minutes, got '{0}'")]
    InvalidDuration(String),
}
