//! Transfer operations
//!
//! Sequences LIST, RETR and STOR over an active-mode data connection:
//! set the transfer type, prepare the data channel, issue the command, check
//! the preliminary reply, move the bytes, then read the completion reply.
//! Each step waits for the previous one; nothing is interleaved.

use log::{info, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::net::TcpStream;

use crate::config::ClientConfig;
use crate::control::ControlChannel;
use crate::error::FtpClientError;
use crate::protocol::{Command, Reply};
use crate::transfer::data_channel::{self, ActiveDataChannel};
use crate::transfer::file_ops;
use crate::transfer::results::DataPhase;
use crate::transfer::{ListingResult, TransferResult, TransferType};

/// One transfer sequence over a connected control channel.
///
/// `transfer_type` is the session's cached `TYPE`, updated only when the
/// server acknowledges a change.
pub struct Transfer<'a> {
    control: &'a mut ControlChannel,
    transfer_type: &'a mut Option<TransferType>,
    config: &'a ClientConfig,
}

/// A data connection that dies mid-transfer does not take the control
/// channel with it.
fn data_phase_error(err: FtpClientError) -> FtpClientError {
    match err {
        FtpClientError::ConnectionLost(msg) => {
            FtpClientError::Transfer(format!("data connection lost: {}", msg))
        }
        other => other,
    }
}

impl<'a> Transfer<'a> {
    pub fn new(
        control: &'a mut ControlChannel,
        transfer_type: &'a mut Option<TransferType>,
        config: &'a ClientConfig,
    ) -> Self {
        Self {
            control,
            transfer_type,
            config,
        }
    }

    /// Sends `TYPE` unless `required` is already in effect.
    pub async fn ensure_type(&mut self, required: TransferType) -> Result<(), FtpClientError> {
        if *self.transfer_type == Some(required) {
            return Ok(());
        }

        let reply = self.control.send(&Command::TYPE(required).to_string()).await?;
        if reply.is_error() {
            return Err(FtpClientError::Transfer(format!(
                "failed to set transfer type {}: {}",
                required.code(),
                reply
            )));
        }

        *self.transfer_type = Some(required);
        Ok(())
    }

    /// Prepares the data channel and issues `command`.
    async fn open_data_phase(&mut self, command: Command) -> Result<DataPhase, FtpClientError> {
        let channel = data_channel::prepare(self.control, self.config.data_bind_ip()).await?;

        let reply = self.control.send(&command.to_string()).await?;
        if reply.is_positive_preliminary() {
            return Ok(DataPhase::Open(channel));
        }

        channel.close();
        if reply.is_error() {
            return Err(FtpClientError::Transfer(format!(
                "{} failed: {}",
                command.verb(),
                reply
            )));
        }
        if self.config.strict_preliminary {
            return Err(FtpClientError::Transfer(format!(
                "{} did not open a data connection: {}",
                command.verb(),
                reply
            )));
        }

        warn!(
            "{} answered {} without a data connection; skipping data phase",
            command.verb(),
            reply.code()
        );
        Ok(DataPhase::Skipped(reply))
    }

    /// Accepts the server's data connection.
    ///
    /// When no connection arrives, the server still owes a reply to the
    /// transfer command; it is consumed here so the next command gets its
    /// own reply. If that reply does not come within the deadline either,
    /// the control channel is out of step and the error is control-fatal.
    async fn accept_data(
        &mut self,
        channel: ActiveDataChannel,
    ) -> Result<TcpStream, FtpClientError> {
        let limit = self.config.data_timeout();
        let err = match channel.accept(limit).await {
            Ok(stream) => return Ok(stream),
            Err(e) => data_phase_error(e),
        };

        let pending = match limit {
            Some(limit) => tokio::time::timeout(limit, self.control.read_reply())
                .await
                .map_err(|_| {
                    FtpClientError::Protocol(format!(
                        "no reply to the transfer command after {}",
                        err
                    ))
                })?,
            None => self.control.read_reply().await,
        }?;

        warn!(
            "Data connection failed ({}); server replied {}",
            err, pending
        );
        Err(err)
    }

    /// Reads the completion reply once the data connection is closed.
    ///
    /// The reply is read even when moving the bytes failed, so the control
    /// channel stays in step with the server; the data-phase error wins.
    async fn complete<T>(
        &mut self,
        verb: &str,
        moved: Result<T, FtpClientError>,
    ) -> Result<(T, Reply), FtpClientError> {
        let reply = self.control.read_reply().await?;
        let moved = moved.map_err(data_phase_error)?;

        if reply.is_error() {
            return Err(FtpClientError::Transfer(format!(
                "{} did not complete: {}",
                verb, reply
            )));
        }
        Ok((moved, reply))
    }

    /// `LIST [path]`: returns the listing text and the completion reply.
    pub async fn list(&mut self, path: Option<&str>) -> Result<ListingResult, FtpClientError> {
        self.ensure_type(TransferType::Ascii).await?;

        let channel = match self
            .open_data_phase(Command::LIST(path.map(str::to_string)))
            .await?
        {
            DataPhase::Open(channel) => channel,
            DataPhase::Skipped(reply) => {
                return Ok(ListingResult {
                    listing: String::new(),
                    reply,
                });
            }
        };

        let limit = self.config.data_timeout();
        let mut stream = self.accept_data(channel).await?;
        let received = file_ops::receive_listing(&mut stream, self.config.buffer_size, limit).await;
        drop(stream);

        let (listing, reply) = self.complete("LIST", received).await?;
        info!("Received listing ({} bytes)", listing.len());
        Ok(ListingResult { listing, reply })
    }

    /// `RETR remote`: writes the file to `local`, or to the remote base name
    /// in the working directory.
    pub async fn download(
        &mut self,
        remote: &str,
        local: Option<&Path>,
    ) -> Result<TransferResult, FtpClientError> {
        let local_path = match local {
            Some(path) => path.to_path_buf(),
            None => file_ops::base_name(remote).map(PathBuf::from).ok_or_else(|| {
                FtpClientError::Argument(format!(
                    "cannot derive a local filename from {:?}",
                    remote
                ))
            })?,
        };

        self.ensure_type(TransferType::Binary).await?;

        let channel = match self.open_data_phase(Command::RETR(remote.to_string())).await? {
            DataPhase::Open(channel) => channel,
            DataPhase::Skipped(reply) => {
                return Ok(TransferResult {
                    local_path,
                    remote_path: remote.to_string(),
                    bytes: 0,
                    reply,
                });
            }
        };

        let limit = self.config.data_timeout();
        let mut stream = self.accept_data(channel).await?;
        let received =
            file_ops::receive_file(&mut stream, &local_path, self.config.buffer_size, limit).await;
        drop(stream);

        let (bytes, reply) = self.complete("RETR", received).await?;
        info!(
            "Downloaded {} to {} ({} bytes)",
            remote,
            local_path.display(),
            bytes
        );
        Ok(TransferResult {
            local_path,
            remote_path: remote.to_string(),
            bytes,
            reply,
        })
    }

    /// `STOR remote`: sends `local`, stored remotely under `remote` or the
    /// local base name. Fails before any network traffic if `local` is missing.
    pub async fn upload(
        &mut self,
        local: &Path,
        remote: Option<&str>,
    ) -> Result<TransferResult, FtpClientError> {
        match tokio::fs::metadata(local).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return Err(FtpClientError::Argument(format!(
                    "{} is not a regular file",
                    local.display()
                )));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FtpClientError::NotFound(local.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        }

        let remote_path = match remote {
            Some(name) => name.to_string(),
            None => local
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    FtpClientError::Argument(format!(
                        "cannot derive a remote filename from {}",
                        local.display()
                    ))
                })?,
        };

        self.ensure_type(TransferType::Binary).await?;

        let channel = match self.open_data_phase(Command::STOR(remote_path.clone())).await? {
            DataPhase::Open(channel) => channel,
            DataPhase::Skipped(reply) => {
                return Ok(TransferResult {
                    local_path: local.to_path_buf(),
                    remote_path,
                    bytes: 0,
                    reply,
                });
            }
        };

        let limit = self.config.data_timeout();
        let mut stream = self.accept_data(channel).await?;
        let sent = file_ops::send_file(local, &mut stream, self.config.buffer_size, limit).await;
        drop(stream);

        let (bytes, reply) = self.complete("STOR", sent).await?;
        info!(
            "Uploaded {} as {} ({} bytes)",
            local.display(),
            remote_path,
            bytes
        );
        Ok(TransferResult {
            local_path: local.to_path_buf(),
            remote_path,
            bytes,
            reply,
        })
    }
}
