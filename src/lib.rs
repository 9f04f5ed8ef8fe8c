//! RAX FTP Client
//!
//! An RFC 959 client using active-mode (PORT) data connections: a control
//! channel for commands and replies, and one short-lived data connection per
//! LIST, RETR or STOR.

pub mod client;
pub mod commands;
pub mod config;
pub mod control;
pub mod error;
pub mod protocol;
pub mod transfer;
pub mod utils;

pub use client::FtpClient;
pub use config::ClientConfig;
pub use error::FtpClientError;
pub use protocol::Reply;
