//! Client session and API
//!
//! Session lifecycle plus the operations front-ends call.

pub mod operations;
pub mod session;

pub use operations::FtpClient;
pub use session::{Connection, Session};
