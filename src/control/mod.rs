//! Control channel
//!
//! The long-lived connection carrying commands and replies.

pub mod channel;

pub use channel::ControlChannel;
