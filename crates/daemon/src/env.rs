// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Directory name used under the platform state directory.
const APP_DIR: &str = "sr";

/// Resolve state directory: SR_STATE_DIR > XDG_STATE_HOME/sr > ~/.local/state/sr
pub fn state_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = state_dir_override() {
        return Ok(dir);
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join(APP_DIR));
    }
    let home = dirs::home_dir().ok_or(ConfigError::NoStateDir)?;
    Ok(home.join(".local/state").join(APP_DIR))
}

/// Explicit state directory from `SR_STATE_DIR`.
pub fn state_dir_override() -> Option<PathBuf> {
    non_empty("SR_STATE_DIR").map(PathBuf::from)
}

/// Bind address override.
pub fn bind() -> Option<String> {
    non_empty("SR_BIND")
}

/// TCP port override.
pub fn port() -> Result<Option<u16>, ConfigError> {
    parsed("SR_PORT")
}

/// Shared secret required in `X-API-Key`. Empty means disabled.
pub fn api_key() -> Option<String> {
    non_empty("SR_API_KEY")
}

/// Default per-invocation timeout in seconds.
pub fn timeout_secs() -> Result<Option<u64>, ConfigError> {
    parsed("SR_TIMEOUT_SECS")
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

fn parsed<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match non_empty(var) {
        None => Ok(None),
        Some(raw) => {
            raw.parse().map(Some).map_err(|_| ConfigError::InvalidEnv { var, value: raw })
        }
    }
}
