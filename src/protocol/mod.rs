//! FTP Protocol implementation
//!
//! Handles command rendering and reply parsing for the control channel.

pub mod commands;
pub mod parser;
pub mod reply;
pub mod responses;

pub use commands::Command;
pub use parser::read_reply;
pub use reply::Reply;
