// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store configuration loaded from a `[store]` table in TOML.
//!
//! ```toml
//! [store]
//! namespace = "CronJob"
//! path = "/var/lib/app/runs.json"
//! log_dir = "/var/log/app"
//! ```
//!
//! Unset paths resolve under [`crate::env::state_dir`].

use crate::env;
use crate::{FileErrorLog, FileRunStore};
use cj_core::{RunRecords, DEFAULT_STORE_NAMESPACE};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors from loading configuration or resolving state paths.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("could not determine state directory")]
    NoStateDir,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    store: StoreConfig,
}

/// Where run records and error logs live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub namespace: String,
    pub path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_STORE_NAMESPACE.to_string(),
            path: None,
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Load from a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load from `CJ_CONFIG` when set, else `<state_dir>/config.toml`.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = match env::config_path() {
            Some(path) => path,
            None => env::state_dir()?.join("config.toml"),
        };
        Self::load(&path)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        let mut config = file.store;
        if config.namespace.trim().is_empty() {
            config.namespace = DEFAULT_STORE_NAMESPACE.to_string();
        }
        Ok(config)
    }

    pub fn records_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(env::state_dir()?.join("runs.json")),
        }
    }

    pub fn log_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.log_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(env::state_dir()?.join("logs")),
        }
    }

    /// Open a [`FileRunStore`] and bind it to the configured namespace.
    pub fn open_records(&self) -> Result<RunRecords, ConfigError> {
        let path = self.records_path()?;
        tracing::info!(
            path = %path.display(),
            namespace = %self.namespace,
            "opening run store",
        );
        Ok(RunRecords::new(
            Arc::new(FileRunStore::open(path)),
            self.namespace.clone(),
        ))
    }

    pub fn error_log(&self) -> Result<FileErrorLog, ConfigError> {
        Ok(FileErrorLog::new(self.log_dir()?))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
