// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the storage crate.

use std::path::PathBuf;

use crate::ConfigError;

/// Resolve state directory: CJ_STATE_DIR > XDG_STATE_HOME/cronjobs > ~/.local/state/cronjobs
pub fn state_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = non_empty_var("CJ_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty_var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("cronjobs"));
    }
    let home = non_empty_var("HOME").ok_or(ConfigError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/cronjobs"))
}

/// Config file override
pub fn config_path() -> Option<PathBuf> {
    non_empty_var("CJ_CONFIG").map(PathBuf::from)
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
