//! Error types for the protocol crate.

use thiserror::Error;

/// Convenience alias for results carrying a [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Transport-level failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error while reading or writing a socket.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be turned into a message.
    #[error("invalid message: {string}")]
    InvalidMessage {
        /// The offending line.
        string: String,
        /// Why it was rejected.
        #[source]
        cause: MessageParseError,
    },

    /// A line carried a control character that may not appear inside it.
    #[error("illegal control character: {0:?}")]
    IllegalControlChar(char),
}

/// Reasons a single line fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Nothing but whitespace (or a bare prefix) on the line.
    #[error("empty message")]
    EmptyMessage,

    /// The command token is missing or malformed.
    #[error("invalid command")]
    InvalidCommand,

    /// A numeric command that is not a known reply code.
    #[error("unknown numeric: {0}")]
    UnknownNumeric(String),
}
