//! Configuration loading and typed config structures for Talkboard.
//!
//! The canonical configuration lives in `talkboard-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure and provides a loader that reads the file. A
//! missing file is not an error; the daemon falls back to defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level daemon configuration.
///
/// Mirrors the structure of `talkboard-config.yaml`. All fields have
/// defaults matching the original service (port 8000, `public/` assets,
/// 90 second long-poll deadline).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DaemonConfig {
    /// Network and asset settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Long-poll policy.
    #[serde(default)]
    pub poll: PollSection,
}

/// Network and asset settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory the browser client is served from.
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_dir: default_public_dir(),
        }
    }
}

/// Long-poll policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PollSection {
    /// How many seconds a long-poll read may stay parked before it
    /// resolves empty.
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,
}

impl Default for PollSection {
    fn default() -> Self {
        Self {
            wait_timeout_secs: default_wait_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8000
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

const fn default_wait_timeout_secs() -> u64 {
    90
}

impl DaemonConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_original_service() {
        let config = DaemonConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.public_dir, PathBuf::from("public"));
        assert_eq!(config.poll.wait_timeout_secs, 90);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config: DaemonConfig = serde_yml::from_str("server:\n  port: 9001\n").unwrap();
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.poll.wait_timeout_secs, 90);
    }
}
