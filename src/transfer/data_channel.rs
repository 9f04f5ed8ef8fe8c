//! Module `data_channel`
//!
//! Active-mode data connections: the client listens on an ephemeral port,
//! advertises it with `PORT`, and the server connects back once per
//! transfer.

use log::{debug, info};
use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;
use tokio::net::{TcpListener, TcpSocket, TcpStream};

use crate::control::ControlChannel;
use crate::error::FtpClientError;
use crate::protocol::Command;

/// A listener prepared for exactly one inbound data connection.
///
/// Dropping it closes the listener.
#[derive(Debug)]
pub struct ActiveDataChannel {
    listener: TcpListener,
    advertised: SocketAddrV4,
}

/// Encodes an address as the RFC 959 `PORT` argument `h1,h2,h3,h4,p1,p2`.
pub fn encode_port_argument(addr: SocketAddrV4) -> String {
    let [h1, h2, h3, h4] = addr.ip().octets();
    let port = addr.port();
    format!("{},{},{},{},{},{}", h1, h2, h3, h4, port / 256, port % 256)
}

/// Picks the address to advertise for a listener bound to `bound`.
///
/// A wildcard bind cannot be connected to, so the control connection's local
/// address stands in for it.
pub fn advertised_ipv4(bound: IpAddr, control_local: IpAddr) -> Result<Ipv4Addr, FtpClientError> {
    let ip = if bound.is_unspecified() {
        control_local
    } else {
        bound
    };

    match ip {
        IpAddr::V4(v4) => Ok(v4),
        IpAddr::V6(v6) => Err(FtpClientError::Transfer(format!(
            "cannot advertise IPv6 address {} with PORT",
            v6
        ))),
    }
}

/// Opens a listener on `bind_ip:0` and announces it with `PORT`.
///
/// The listener is closed again if the server rejects the address.
pub async fn prepare(
    control: &mut ControlChannel,
    bind_ip: Ipv4Addr,
) -> Result<ActiveDataChannel, FtpClientError> {
    let socket = TcpSocket::new_v4()?;
    socket.bind(SocketAddr::new(bind_ip.into(), 0))?;
    let listener = socket.listen(1)?;

    let bound = listener.local_addr()?;
    let ip = advertised_ipv4(bound.ip(), control.local_addr().ip())?;
    let advertised = SocketAddrV4::new(ip, bound.port());
    debug!("Data listener bound to {}, advertising {}", bound, advertised);

    let reply = control
        .send(&Command::PORT(encode_port_argument(advertised)).to_string())
        .await?;
    if reply.is_error() {
        drop(listener);
        return Err(FtpClientError::Transfer(format!("PORT rejected: {}", reply)));
    }

    Ok(ActiveDataChannel {
        listener,
        advertised,
    })
}

/// Awaits `fut`, giving up after `limit` if one is set.
pub(crate) async fn with_deadline<F, T>(
    limit: Option<Duration>,
    what: &str,
    fut: F,
) -> Result<T, FtpClientError>
where
    F: Future<Output = std::io::Result<T>>,
{
    match limit {
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(FtpClientError::Transfer(format!(
                "timed out after {:?} waiting to {}",
                limit, what
            ))),
        },
        None => Ok(fut.await?),
    }
}

impl ActiveDataChannel {
    /// Address announced to the server.
    pub fn advertised_addr(&self) -> SocketAddrV4 {
        self.advertised
    }

    /// Waits for the server to connect, then closes the listener.
    pub async fn accept(self, limit: Option<Duration>) -> Result<TcpStream, FtpClientError> {
        let (stream, peer) =
            with_deadline(limit, "accept the data connection", self.listener.accept()).await?;
        info!("Data connection accepted from {} on {}", peer, self.advertised);
        Ok(stream)
    }

    /// Tears the listener down without accepting.
    pub fn close(self) {
        debug!("Closing unused data listener on {}", self.advertised);
    }
}
