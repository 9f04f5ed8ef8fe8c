//! Transfer result types
//!
//! Defines result structures returned by transfer operations.

use std::path::PathBuf;

use crate::protocol::Reply;
use crate::transfer::ActiveDataChannel;

/// Outcome of a directory listing.
#[derive(Debug, Clone)]
pub struct ListingResult {
    /// Listing text as sent by the server, line breaks preserved
    pub listing: String,
    /// Completion reply, or the reply that skipped the data phase
    pub reply: Reply,
}

/// Outcome of a file download or upload.
#[derive(Debug, Clone)]
pub struct TransferResult {
    pub local_path: PathBuf,
    pub remote_path: String,
    pub bytes: u64,
    pub reply: Reply,
}

/// What the reply to a transfer command allows next.
#[derive(Debug)]
pub(crate) enum DataPhase {
    /// Preliminary reply received; the server is about to connect.
    Open(ActiveDataChannel),
    /// Non-error reply without a data connection.
    Skipped(Reply),
}
