//! Command-line front-end
//!
//! Parses `ftp>` input and drives `FtpClient`.

pub mod handlers;
pub mod parser;

pub use handlers::{handle_command, run_repl};
pub use parser::{CommandResult, UserCommand, parse_command};
