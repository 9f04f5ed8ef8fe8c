//! Client session management
//!
//! A session is either disconnected or owns exactly one control connection
//! together with the transfer type last acknowledged by the server.

use crate::control::ControlChannel;
use crate::error::FtpClientError;
use crate::transfer::TransferType;

/// State of an open control connection.
pub struct Connection {
    pub(crate) control: ControlChannel,
    pub(crate) host: String,
    /// `None` until the first `TYPE` is acknowledged
    pub(crate) transfer_type: Option<TransferType>,
}

impl Connection {
    pub fn new(control: ControlChannel, host: String) -> Self {
        Self {
            control,
            host,
            transfer_type: None,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn transfer_type(&self) -> Option<TransferType> {
        self.transfer_type
    }
}

/// Error for operations that need an open control connection.
pub(crate) fn not_connected() -> FtpClientError {
    FtpClientError::State("Not connected to any FTP server. Use 'open <host>' first.".into())
}

/// Session lifecycle
#[derive(Default)]
pub enum Session {
    #[default]
    Disconnected,
    Connected(Connection),
}

impl Session {
    pub fn is_connected(&self) -> bool {
        matches!(self, Session::Connected(_))
    }

    pub fn connection(&self) -> Option<&Connection> {
        match self {
            Session::Connected(conn) => Some(conn),
            Session::Disconnected => None,
        }
    }

    /// The open connection, or `StateError` when there is none.
    pub fn connection_mut(&mut self) -> Result<&mut Connection, FtpClientError> {
        match self {
            Session::Connected(conn) => Ok(conn),
            Session::Disconnected => Err(not_connected()),
        }
    }

    /// Leaves the session disconnected, handing back the connection if any.
    pub fn take(&mut self) -> Option<Connection> {
        match std::mem::take(self) {
            Session::Connected(conn) => Some(conn),
            Session::Disconnected => None,
        }
    }
}
