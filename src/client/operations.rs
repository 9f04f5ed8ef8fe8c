//! FTP client operations
//!
//! The API the command-line front-end (or any other front-end) drives. Each
//! operation checks the session state first, and any error that leaves the
//! control channel unusable drops the session back to disconnected.

use log::{info, warn};
use std::path::Path;

use crate::client::session::{Connection, Session, not_connected};
use crate::config::ClientConfig;
use crate::control::ControlChannel;
use crate::error::FtpClientError;
use crate::protocol::responses::PASSWORD_REQUIRED;
use crate::protocol::{Command, Reply};
use crate::transfer::{ListingResult, Transfer, TransferResult, TransferType};

/// An FTP client holding at most one control connection.
#[derive(Default)]
pub struct FtpClient {
    session: Session,
    config: ClientConfig,
}

impl FtpClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            session: Session::Disconnected,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    /// Host given to the current connection's `connect`.
    pub fn host(&self) -> Option<&str> {
        self.session.connection().map(Connection::host)
    }

    /// Transfer type currently acknowledged by the server.
    pub fn transfer_type(&self) -> Option<TransferType> {
        self.session.connection().and_then(Connection::transfer_type)
    }

    /// Fails with `StateError` unless a control connection is open.
    pub fn ensure_connected(&self) -> Result<(), FtpClientError> {
        self.session.connection().map(|_| ()).ok_or_else(not_connected)
    }

    /// Opens the control connection and returns the server greeting.
    pub async fn connect(&mut self, host: &str, port: u16) -> Result<Reply, FtpClientError> {
        if self.session.is_connected() {
            return Err(FtpClientError::State(
                "Already connected. Use close before opening a new connection.".into(),
            ));
        }

        let (control, greeting) = ControlChannel::connect(host, port).await?;
        self.session = Session::Connected(Connection::new(control, host.to_string()));
        Ok(greeting)
    }

    /// Sends a raw command line and returns its reply, whatever the code.
    pub async fn send_command(&mut self, line: &str) -> Result<Reply, FtpClientError> {
        let result = match self.session.connection_mut() {
            Ok(conn) => conn.control.send(line).await,
            Err(e) => return Err(e),
        };
        self.settle(result).await
    }

    /// `USER`, then `PASS` if the server asks for one. Returns the last reply.
    pub async fn login(&mut self, user: &str, password: &str) -> Result<Reply, FtpClientError> {
        let reply = self.send_command(&Command::USER(user.to_string()).to_string()).await?;
        if reply.code() != PASSWORD_REQUIRED {
            return Ok(reply);
        }
        self.send_command(&Command::PASS(password.to_string()).to_string())
            .await
    }

    /// `CWD path`
    pub async fn change_directory(&mut self, path: &str) -> Result<Reply, FtpClientError> {
        self.send_command(&Command::CWD(path.to_string()).to_string())
            .await
    }

    /// `LIST [path]` over a fresh data connection.
    pub async fn list_directory(
        &mut self,
        path: Option<&str>,
    ) -> Result<ListingResult, FtpClientError> {
        let result = match self.session.connection_mut() {
            Ok(conn) => {
                Transfer::new(&mut conn.control, &mut conn.transfer_type, &self.config)
                    .list(path)
                    .await
            }
            Err(e) => return Err(e),
        };
        self.settle(result).await
    }

    /// `RETR remote` into `local`, defaulting to the remote base name.
    pub async fn download(
        &mut self,
        remote: &str,
        local: Option<&Path>,
    ) -> Result<TransferResult, FtpClientError> {
        let result = match self.session.connection_mut() {
            Ok(conn) => {
                Transfer::new(&mut conn.control, &mut conn.transfer_type, &self.config)
                    .download(remote, local)
                    .await
            }
            Err(e) => return Err(e),
        };
        self.settle(result).await
    }

    /// `STOR` of `local`, stored under `remote` or the local base name.
    pub async fn upload(
        &mut self,
        local: &Path,
        remote: Option<&str>,
    ) -> Result<TransferResult, FtpClientError> {
        let result = match self.session.connection_mut() {
            Ok(conn) => {
                Transfer::new(&mut conn.control, &mut conn.transfer_type, &self.config)
                    .upload(local, remote)
                    .await
            }
            Err(e) => return Err(e),
        };
        self.settle(result).await
    }

    /// Sends `QUIT` if connected, then closes the control connection no
    /// matter what the server answered.
    pub async fn quit(&mut self) -> Result<Option<Reply>, FtpClientError> {
        let Some(mut conn) = self.session.take() else {
            return Ok(None);
        };

        let result = conn.control.send(&Command::QUIT.to_string()).await;
        conn.control.close().await;

        let reply = result?;
        if reply.is_error() {
            warn!("QUIT reported an error ({}); connection closed anyway", reply);
        }
        Ok(Some(reply))
    }

    /// Drops the control connection without sending anything. Idempotent.
    pub async fn close(&mut self) {
        if let Some(conn) = self.session.take() {
            info!("Closing connection to {}", conn.host);
            conn.control.close().await;
        }
    }

    /// Forces the session back to disconnected after a control-fatal error.
    async fn settle<T>(
        &mut self,
        result: Result<T, FtpClientError>,
    ) -> Result<T, FtpClientError> {
        if let Err(e) = &result {
            if e.is_control_fatal() {
                warn!("Control channel unusable ({}); disconnecting", e);
                self.close().await;
            }
        }
        result
    }
}
