#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use thiserror::Error;

/// Errors surfaced to callers of the client layer.
///
/// Malformed and out-of-range edit payloads are deliberately not errors:
/// the chat channel legitimately carries non-edit traffic, so those are
/// classified as skip outcomes (see `edits::EditOutcome`) instead.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    /// HTTP or transport failure. The message is what was published to the
    /// error subject.
    #[error("{0}")]
    Network(String),

    /// `send` was attempted with no open WebSocket.
    #[error("WebSocket is not connected")]
    NotConnected,
}
