//! FTP reply codes
//!
//! The reply codes the client inspects when deciding what to do next.

pub const DATA_CONNECTION_OPEN: u16 = 125;
pub const FILE_STATUS_OK: u16 = 150;
pub const READY: u16 = 220;
pub const PASSWORD_REQUIRED: u16 = 331;
