//! Error types
//!
//! Defines the error taxonomy surfaced by the control channel, the data
//! channel, and the transfer operations.

use std::fmt;
use std::io::{self, ErrorKind};
use std::path::PathBuf;

/// General FTP client error that encompasses every failure the client reports.
#[derive(Debug)]
pub enum FtpClientError {
    /// Malformed or truncated reply framing on the control channel.
    Protocol(String),
    /// Operation invoked in the wrong session state.
    State(String),
    /// PORT/TYPE rejected, or a transfer command answered with an error.
    Transfer(String),
    /// A required argument could not be derived.
    Argument(String),
    /// Local upload source does not exist.
    NotFound(PathBuf),
    /// Peer closed or reset the socket mid-read.
    ConnectionLost(String),
    IoError(io::Error),
}

impl FtpClientError {
    /// Whether the control channel must be considered unusable after this error.
    pub fn is_control_fatal(&self) -> bool {
        matches!(
            self,
            FtpClientError::Protocol(_) | FtpClientError::ConnectionLost(_)
        )
    }
}

impl fmt::Display for FtpClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FtpClientError::Protocol(msg) => write!(f, "Protocol error: {}", msg),
            FtpClientError::State(msg) => write!(f, "{}", msg),
            FtpClientError::Transfer(msg) => write!(f, "Transfer error: {}", msg),
            FtpClientError::Argument(msg) => write!(f, "Invalid argument: {}", msg),
            FtpClientError::NotFound(path) => {
                write!(f, "Local file not found: {}", path.display())
            }
            FtpClientError::ConnectionLost(msg) => write!(f, "Connection lost: {}", msg),
            FtpClientError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for FtpClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FtpClientError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FtpClientError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe
            | ErrorKind::UnexpectedEof => FtpClientError::ConnectionLost(error.to_string()),
            _ => FtpClientError::IoError(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_maps_to_connection_lost() {
        let err: FtpClientError = io::Error::new(ErrorKind::ConnectionReset, "reset").into();
        assert!(matches!(err, FtpClientError::ConnectionLost(_)));
        assert!(err.is_control_fatal());
    }

    #[test]
    fn local_io_errors_are_not_control_fatal() {
        let err: FtpClientError = io::Error::new(ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, FtpClientError::IoError(_)));
        assert!(!err.is_control_fatal());
    }

    #[test]
    fn not_found_names_the_path() {
        let err = FtpClientError::NotFound(PathBuf::from("missing.bin"));
        assert_eq!(err.to_string(), "Local file not found: missing.bin");
    }
}
