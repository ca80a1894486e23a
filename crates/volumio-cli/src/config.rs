//! Configuration file handling for volumio-cli

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use volumio_client::DEFAULT_PORT;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the CLI tool
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default device host
    pub host: Option<String>,
    /// Default device port
    pub port: Option<u16>,
    /// Request timeout in seconds
    pub timeout: Option<u64>,
    /// Default output format
    pub output: Option<String>,
    /// Disable colored output
    pub no_color: Option<bool>,
}

impl Config {
    /// Load configuration from the default config file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("volumio-cli");

        Ok(config_dir.join("config.toml"))
    }

    /// Merge CLI arguments over config file values
    pub fn merge_with_args(
        &self,
        host: Option<&str>,
        port: Option<u16>,
        timeout: Option<u64>,
        output: Option<&str>,
        no_color: bool,
    ) -> MergedConfig {
        MergedConfig {
            host: host
                .map(String::from)
                .or_else(|| self.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: port.or(self.port).unwrap_or(DEFAULT_PORT),
            timeout: Duration::from_secs(
                timeout.or(self.timeout).unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            output: output
                .map(String::from)
                .or_else(|| self.output.clone())
                .unwrap_or_else(|| "table".to_string()),
            no_color: no_color || self.no_color.unwrap_or(false),
        }
    }
}

/// Fully resolved configuration after merging CLI args
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
    pub output: String,
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults_without_config() {
        let merged = Config::default().merge_with_args(None, None, None, None, false);
        assert_eq!(merged.host, "localhost");
        assert_eq!(merged.port, 3000);
        assert_eq!(merged.timeout, Duration::from_secs(10));
        assert_eq!(merged.output, "table");
        assert!(!merged.no_color);
    }

    #[test]
    fn test_args_override_file() {
        let config = Config {
            host: Some("volumio.local".to_string()),
            port: Some(8080),
            timeout: Some(3),
            output: Some("json".to_string()),
            no_color: Some(true),
        };

        let merged = config.merge_with_args(Some("10.0.0.5"), None, Some(1), None, false);
        assert_eq!(merged.host, "10.0.0.5");
        assert_eq!(merged.port, 8080);
        assert_eq!(merged.timeout, Duration::from_secs(1));
        assert_eq!(merged.output, "json");
        assert!(merged.no_color);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host = \"volumio.local\"\nport = 3001").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.host.as_deref(), Some("volumio.local"));
        assert_eq!(config.port, Some(3001));
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
