//! Error types for client sessions.

use thiserror::Error;

/// Errors that can occur while establishing or running a session.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Dialing the server failed.
    #[error("connection failed: {addr} - {reason}")]
    ConnectFailed {
        /// The address that failed to connect.
        addr: String,
        /// Reason for failure.
        reason: String,
    },

    /// TLS setup or handshake failed.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Protocol registration was rejected.
    #[error("registration failed: {reason}")]
    RegistrationFailed {
        /// Reason for failure.
        reason: String,
    },

    /// The server closed the connection outside a deliberate quit.
    #[error("connection closed: {reason}")]
    ConnectionClosed {
        /// Reason for closure.
        reason: String,
    },

    /// A protocol line exceeded the line-length cap.
    #[error("line too long: {len} bytes (limit {limit})")]
    LineTooLong {
        /// Length of the offending line.
        len: usize,
        /// The cap that was exceeded.
        limit: usize,
    },

    /// The outbound action queue is gone.
    #[error("failed to send message: {0}")]
    SendFailed(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
