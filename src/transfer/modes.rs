//! FTP transfer types
//!
//! ASCII for directory listings, image (binary) for file content.

/// Representation type negotiated with `TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferType {
    Ascii,
    Binary,
}

impl TransferType {
    /// Argument of the `TYPE` command.
    pub fn code(self) -> char {
        match self {
            TransferType::Ascii => 'A',
            TransferType::Binary => 'I',
        }
    }
}
