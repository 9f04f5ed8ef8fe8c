//! Configuration management for the RAX FTP client
//!
//! Values come from an optional `rax-ftp-client` config file in the working
//! directory, overridden by `RAX_FTP_CLIENT_*` environment variables. Every
//! key has a default, so no file is required.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::net::Ipv4Addr;
use std::path::Path;
use std::time::Duration;

const CONFIG_NAME: &str = "rax-ftp-client";
const ENV_PREFIX: &str = "RAX_FTP_CLIENT";

/// Client configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    /// Control port used when `open` is given no port
    pub default_port: u16,

    /// IPv4 address the active-mode data listener binds to
    pub data_bind_address: String,

    /// Chunk size for data channel copies
    pub buffer_size: usize,

    /// Deadline for accepting and for each data channel read/write (0 = none)
    pub data_timeout_secs: u64,

    /// Reject non-preliminary replies to LIST/RETR/STOR instead of skipping
    /// the data phase
    pub strict_preliminary: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_port: 21,
            data_bind_address: "0.0.0.0".to_string(),
            buffer_size: 4096,
            data_timeout_secs: 0,
            strict_preliminary: false,
        }
    }
}

impl ClientConfig {
    /// Load configuration from `rax-ftp-client.*` with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(File::with_name(CONFIG_NAME).required(false))
    }

    /// Load configuration from an explicit file with environment overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_port == 0 {
            return Err(ConfigError::Message("default_port cannot be 0".into()));
        }

        if self.buffer_size == 0 {
            return Err(ConfigError::Message(
                "buffer_size must be greater than 0".into(),
            ));
        }

        if self.data_bind_address.parse::<Ipv4Addr>().is_err() {
            return Err(ConfigError::Message(format!(
                "data_bind_address must be an IPv4 address, got {:?}",
                self.data_bind_address
            )));
        }

        Ok(())
    }

    /// Data listener bind address, falling back to the wildcard address
    pub fn data_bind_ip(&self) -> Ipv4Addr {
        self.data_bind_address
            .parse()
            .unwrap_or(Ipv4Addr::UNSPECIFIED)
    }

    /// Data channel deadline, `None` when disabled
    pub fn data_timeout(&self) -> Option<Duration> {
        match self.data_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "rax-ftp-client-{}-{}.toml",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.default_port, 21);
        assert_eq!(config.data_bind_ip(), Ipv4Addr::UNSPECIFIED);
        assert_eq!(config.data_timeout(), None);
        assert!(!config.strict_preliminary);
    }

    #[test]
    fn file_values_override_defaults() {
        let path = write_config(
            "override",
            "default_port = 2121\nbuffer_size = 512\ndata_timeout_secs = 5\n",
        );
        let config = ClientConfig::load_from(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.default_port, 2121);
        assert_eq!(config.buffer_size, 512);
        assert_eq!(config.data_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.data_bind_address, "0.0.0.0");
    }

    #[test]
    fn rejects_non_ipv4_bind_address() {
        let path = write_config("bad-bind", "data_bind_address = \"::1\"\n");
        let err = ClientConfig::load_from(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("IPv4"));
    }

    #[test]
    fn rejects_zero_buffer() {
        let path = write_config("zero-buffer", "buffer_size = 0\n");
        assert!(ClientConfig::load_from(&path).is_err());
        fs::remove_file(&path).unwrap();
    }
}
