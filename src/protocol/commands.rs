//! Module `commands`
//!
//! Defines the subset of RFC 959 commands the client issues on the control
//! channel. `Display` renders the wire form without the CRLF terminator.

use std::fmt;

use crate::transfer::TransferType;

/// An FTP command sent by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    USER(String),
    PASS(String),
    CWD(String),
    TYPE(TransferType),
    PORT(String), // h1,h2,h3,h4,p1,p2
    LIST(Option<String>),
    RETR(String),
    STOR(String),
    QUIT,
}

impl Command {
    /// Command verb as sent on the wire.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::USER(_) => "USER",
            Command::PASS(_) => "PASS",
            Command::CWD(_) => "CWD",
            Command::TYPE(_) => "TYPE",
            Command::PORT(_) => "PORT",
            Command::LIST(_) => "LIST",
            Command::RETR(_) => "RETR",
            Command::STOR(_) => "STOR",
            Command::QUIT => "QUIT",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::USER(user) => write!(f, "USER {}", user),
            Command::PASS(pass) => write!(f, "PASS {}", pass),
            Command::CWD(path) => write!(f, "CWD {}", path),
            Command::TYPE(kind) => write!(f, "TYPE {}", kind.code()),
            Command::PORT(arg) => write!(f, "PORT {}", arg),
            Command::LIST(None) => write!(f, "LIST"),
            Command::LIST(Some(path)) => write!(f, "LIST {}", path),
            Command::RETR(path) => write!(f, "RETR {}", path),
            Command::STOR(path) => write!(f, "STOR {}", path),
            Command::QUIT => write!(f, "QUIT"),
        }
    }
}

/// Renders a command line for logs, hiding the password of `PASS`.
pub fn redact(line: &str) -> String {
    match line.get(..5) {
        Some(verb) if verb.eq_ignore_ascii_case("PASS ") => "PASS ******".to_string(),
        _ => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_wire_form() {
        assert_eq!(Command::USER("anonymous".into()).to_string(), "USER anonymous");
        assert_eq!(Command::TYPE(TransferType::Ascii).to_string(), "TYPE A");
        assert_eq!(Command::TYPE(TransferType::Binary).to_string(), "TYPE I");
        assert_eq!(Command::LIST(None).to_string(), "LIST");
        assert_eq!(Command::LIST(Some("/pub".into())).to_string(), "LIST /pub");
        assert_eq!(
            Command::PORT("10,0,0,5,200,0".into()).to_string(),
            "PORT 10,0,0,5,200,0"
        );
        assert_eq!(Command::QUIT.to_string(), "QUIT");
    }

    #[test]
    fn redacts_password() {
        assert_eq!(redact("PASS hunter2"), "PASS ******");
        assert_eq!(redact("pass hunter2"), "PASS ******");
        assert_eq!(redact("USER bob"), "USER bob");
        assert_eq!(redact("PWD"), "PWD");
    }
}
