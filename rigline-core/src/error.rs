//! Rigline Error Types
//!
//! Error handling for all client operations. Every failure is terminal to
//! the current operation only; nothing here retries or reconnects.

use std::io;
use thiserror::Error;

/// Main error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection attempt failed (refused, unreachable, or timed out)
    #[error("Failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: io::Error,
    },

    /// A send was attempted without an open connection
    #[error("Not connected to the rig server")]
    NotConnected,

    /// IO error during an exchange
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Envelope serialization failed
    #[error("Failed to encode command envelope: {0}")]
    Encode(#[from] serde_json::Error),

    /// Response bytes were not valid UTF-8
    #[error("Response is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Endpoint could not be parsed or resolved
    #[error("Endpoint error: {0}")]
    Endpoint(#[from] crate::endpoint::EndpointError),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Check if this error means the connection itself is gone or was
    /// never established.
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        match self {
            Self::Connect { .. } | Self::NotConnected => true,
            Self::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::UnexpectedEof
            ),
            _ => false,
        }
    }

    /// Check if this error was a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Connect { source, .. } => is_timeout_io(source),
            Self::Io(e) => is_timeout_io(e),
            _ => false,
        }
    }
}

// Blocking sockets report an expired read/write timeout as WouldBlock on
// Unix and TimedOut on Windows.
fn is_timeout_io(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_connected_is_connection_error() {
        assert!(ClientError::NotConnected.is_connection_error());
        assert!(!ClientError::NotConnected.is_timeout());
    }

    #[test]
    fn test_connect_timeout_classification() {
        let err = ClientError::Connect {
            endpoint: "127.0.0.1:7777".to_string(),
            source: io::Error::new(io::ErrorKind::TimedOut, "connect timed out"),
        };
        assert!(err.is_connection_error());
        assert!(err.is_timeout());
    }

    #[test]
    fn test_reset_mid_exchange_is_connection_error() {
        let err = ClientError::Io(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        assert!(err.is_connection_error());
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_decode_error_is_not_connection_error() {
        let err = ClientError::Utf8(String::from_utf8(vec![0xff, 0xfe]).unwrap_err());
        assert!(!err.is_connection_error());
    }
}
