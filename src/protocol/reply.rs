//! FTP reply representation
//!
//! A reply is a three-digit status code plus every line the server sent for it.

use std::fmt;

use crate::protocol::responses::{DATA_CONNECTION_OPEN, FILE_STATUS_OK};

/// A complete reply read from the control channel.
///
/// `lines` always holds at least one entry and the first entry starts with
/// the code. Multi-line replies keep every line, terminator included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    code: u16,
    lines: Vec<String>,
}

impl Reply {
    pub fn new(code: u16, lines: Vec<String>) -> Self {
        Self { code, lines }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// 125 or 150: the server is about to open the data connection.
    pub fn is_positive_preliminary(&self) -> bool {
        matches!(self.code, DATA_CONNECTION_OPEN | FILE_STATUS_OK)
    }

    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn is_error(&self) -> bool {
        self.code >= 400
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}
