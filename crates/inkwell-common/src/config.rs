//! Configuration types for Inkwell
//!
//! The server binary layers these defaults with a TOML file, `INKWELL_*`
//! environment variables and command-line flags.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

/// Root configuration for Inkwell
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP server listens on
    pub listen: SocketAddr,
    /// Storage configuration
    pub storage: StorageConfig,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from((Ipv4Addr::LOCALHOST, 8000)),
            storage: StorageConfig::default(),
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Check settings that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.storage.backend != StorageBackend::Memory
            && self.storage.data_dir.as_os_str().is_empty()
        {
            return Err(Error::configuration(format!(
                "storage.data_dir must be set for the '{}' backend",
                self.storage.backend
            )));
        }
        if self.log_level.trim().is_empty() {
            return Err(Error::configuration("log_level must not be empty"));
        }
        Ok(())
    }
}

/// Storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Which backend holds the posts
    pub backend: StorageBackend,
    /// Directory for post files or the redb database
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: PathBuf::from("entries"),
        }
    }
}

/// Storage backend selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Volatile, process-local map
    Memory,
    /// One markdown file per post
    #[default]
    Files,
    /// Single redb database file
    Redb,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::Files => "files",
            Self::Redb => "redb",
        })
    }
}

impl FromStr for StorageBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "files" | "file" => Ok(Self::Files),
            "redb" => Ok(Self::Redb),
            other => Err(Error::configuration(format!(
                "unknown storage backend '{other}' (expected memory, files or redb)"
            ))),
        }
    }
}

/// Log output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.listen.port(), 8000);
        assert_eq!(config.storage.backend, StorageBackend::Files);
        assert_eq!(config.storage.data_dir, PathBuf::from("entries"));
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert_eq!("Files".parse::<StorageBackend>().unwrap(), StorageBackend::Files);
        assert_eq!("redb".parse::<StorageBackend>().unwrap(), StorageBackend::Redb);
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_empty_data_dir_rejected() {
        let mut config = Config::default();
        config.storage.data_dir = PathBuf::new();
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));

        config.storage.backend = StorageBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"storage":{"backend":"redb"},"log_format":"json"}"#).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Redb);
        assert_eq!(config.storage.data_dir, PathBuf::from("entries"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "info");
    }
}
