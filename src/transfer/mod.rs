//! Transfer module for the FTP client
//!
//! Handles active-mode data channels and the LIST/RETR/STOR sequences built
//! on top of them.

pub mod data_channel;
pub mod file_ops;
pub mod modes;
pub mod operations;
pub mod results;

// Re-export key types and functions
pub use data_channel::{ActiveDataChannel, encode_port_argument};
pub use modes::TransferType;
pub use operations::Transfer;
pub use results::{ListingResult, TransferResult};
