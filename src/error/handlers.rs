//! Error handlers
//!
//! Reporting helpers used at the command-dispatch boundary.

use crate::error::types::FtpClientError;
use log::error;

/// Log an FTP client error
pub fn handle_error(err: &FtpClientError) {
    error!("FTP client {} error: {}", error_kind(err), err);
}

/// Short label for an error, used when reporting to the user
pub fn error_kind(err: &FtpClientError) -> &'static str {
    match err {
        FtpClientError::Protocol(_) => "protocol",
        FtpClientError::State(_) => "state",
        FtpClientError::Transfer(_) => "transfer",
        FtpClientError::Argument(_) => "argument",
        FtpClientError::NotFound(_) => "not-found",
        FtpClientError::ConnectionLost(_) => "connection-lost",
        FtpClientError::IoError(_) => "io",
    }
}
