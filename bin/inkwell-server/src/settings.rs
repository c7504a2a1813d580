//! Configuration loading.
//!
//! Precedence, lowest first: built-in defaults, the TOML file, `INKWELL_*`
//! environment variables (`__` separates nested keys, e.g.
//! `INKWELL_STORAGE__BACKEND`), then command-line flags.

use anyhow::{Context, Result};
use inkwell_common::Config;
use inkwell_common::config::StorageBackend;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Default)]
pub struct Overrides {
    pub listen: Option<SocketAddr>,
    pub backend: Option<StorageBackend>,
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Build the effective configuration.
pub fn load(file: Option<&Path>, overrides: Overrides) -> Result<Config> {
    let defaults = config::Config::try_from(&Config::default())
        .context("Failed to serialize default configuration")?;

    let mut builder = config::Config::builder().add_source(defaults);
    if let Some(path) = file {
        builder = builder.add_source(config::File::from(path).required(true));
    }
    builder = builder.add_source(
        config::Environment::with_prefix("INKWELL")
            .prefix_separator("_")
            .separator("__"),
    );

    let mut cfg: Config = builder
        .build()
        .and_then(config::Config::try_deserialize)
        .context("Failed to load configuration")?;

    if let Some(listen) = overrides.listen {
        cfg.listen = listen;
    }
    if let Some(backend) = overrides.backend {
        cfg.storage.backend = backend;
    }
    if let Some(data_dir) = overrides.data_dir {
        cfg.storage.data_dir = data_dir;
    }
    if let Some(level) = overrides.log_level {
        cfg.log_level = level;
    }

    cfg.validate()?;
    Ok(cfg)
}
