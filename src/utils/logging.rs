//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::{Builder, Env};

/// Setup logging for the client. `RUST_LOG` overrides the default `warn`
/// filter; output goes to stderr so it never mixes with the prompt.
pub fn setup_logging() {
    Builder::from_env(Env::default().default_filter_or("warn")).init();
}
