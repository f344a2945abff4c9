//! Domain-level errors.

use thiserror::Error;

/// Validation failures for client-supplied values.
///
/// These are never propagated to other clients; the handler drops the
/// offending event and logs it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("room id must not be empty")]
    EmptyRoomId,
    #[error("user id must not be empty")]
    EmptyUserId,
    #[error("message content must not be empty")]
    EmptyMessageContent,
    #[error("message content exceeds the maximum length (got {0} characters)")]
    MessageTooLong(usize),
}

/// Failures when pushing an event to a single session
#[derive(Debug, Error)]
pub enum EventPushError {
    #[error("session '{0}' not found")]
    SessionNotFound(String),
    #[error("failed to push event to session '{0}': channel closed")]
    ChannelClosed(String),
}
