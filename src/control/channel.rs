//! Module `channel`
//!
//! Owns the control connection: sends CRLF-terminated command lines and
//! parses exactly one reply for each of them.

use log::{debug, info};
use std::net::SocketAddr;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

use crate::error::FtpClientError;
use crate::protocol::commands::redact;
use crate::protocol::{Reply, read_reply};

/// An open control connection to an FTP server.
pub struct ControlChannel {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    local_addr: SocketAddr,
    peer_addr: SocketAddr,
}

impl ControlChannel {
    /// Connects to `host:port` over IPv4 and reads the server greeting.
    ///
    /// The greeting is returned whatever its code; the caller decides
    /// whether a non-2xx greeting is fatal.
    pub async fn connect(host: &str, port: u16) -> Result<(Self, Reply), FtpClientError> {
        let addr = tokio::net::lookup_host((host, port))
            .await?
            .find(SocketAddr::is_ipv4)
            .ok_or_else(|| {
                FtpClientError::Argument(format!("no IPv4 address found for {}", host))
            })?;

        debug!("Connecting to {} ({})", host, addr);
        let stream = TcpStream::connect(addr).await?;
        let local_addr = stream.local_addr()?;
        let peer_addr = stream.peer_addr()?;

        let (read_half, write_half) = stream.into_split();
        let mut channel = Self {
            reader: BufReader::new(read_half),
            writer: write_half,
            local_addr,
            peer_addr,
        };

        let greeting = channel.read_reply().await?;
        info!("Connected to {} from {}", peer_addr, local_addr);
        Ok((channel, greeting))
    }

    /// Sends one command line and returns the reply it produced.
    pub async fn send(&mut self, line: &str) -> Result<Reply, FtpClientError> {
        debug!("CC OUT: {}", redact(line));
        let mut wire = String::with_capacity(line.len() + 2);
        wire.push_str(line);
        wire.push_str("\r\n");

        self.writer.write_all(wire.as_bytes()).await?;
        self.writer.flush().await?;
        self.read_reply().await
    }

    /// Reads the next reply without sending anything, e.g. the completion
    /// reply that follows a data transfer.
    pub async fn read_reply(&mut self) -> Result<Reply, FtpClientError> {
        let reply = read_reply(&mut self.reader).await?;
        debug!("CC IN: {}", reply);
        Ok(reply)
    }

    /// Local address of the control socket, i.e. the interface the server
    /// can reach this client on.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Shuts the connection down. Failures are ignored; the sockets are
    /// released either way.
    pub async fn close(mut self) {
        if let Err(e) = self.writer.shutdown().await {
            debug!("Ignoring error while shutting down control channel: {}", e);
        }
        info!("Control connection to {} closed", self.peer_addr);
    }
}
