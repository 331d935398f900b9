//! Service configuration persisted to a JSON file.
//!
//! The file is created with defaults on first run and loaded verbatim
//! afterwards. It is read once at startup and never written again.

use std::net::SocketAddr;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where the configuration lives, relative to the working directory.
pub const CONFIG_PATH: &str = "config.json";

/// Errors that can occur while loading or saving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured port does not form a valid bind address.
    #[error("Invalid port in config: {0}")]
    InvalidPort(String),
}

/// The persisted service configuration.
///
/// Missing fields decode to empty strings, matching the loose decode
/// semantics of the file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The port to listen on, string-encoded.
    #[serde(default)]
    pub port: String,
    /// The service display name.
    #[serde(default)]
    pub name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: "8080".to_string(),
            name: "Pro1".to_string(),
        }
    }
}

impl Config {
    /// Load the configuration from `path`, creating it with defaults
    /// if it does not exist.
    ///
    /// A failed write of the default file is logged and ignored; an
    /// unreadable or unparseable existing file is an error.
    pub fn ensure_and_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                warn!("Failed to save default config to {}: {e}", path.display());
            }
            return Ok(config);
        }

        let data = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&data)?;
        Ok(config)
    }

    /// Persist the configuration, pretty-printed with a single-space
    /// indent.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        std::fs::write(path, buf)?;
        Ok(())
    }

    /// The address the server should bind to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("0.0.0.0:{port}", port = self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidPort(self.port.clone()))
    }
}
