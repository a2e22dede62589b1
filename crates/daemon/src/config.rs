// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration.
//!
//! Built once in `main` from four layers, later ones winning: built-in
//! defaults, an optional TOML file, `SR_*` environment variables, then
//! command-line flags. The resolved [`Config`] is passed by value into each
//! component; nothing reads the environment after startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::env;

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Timeout must be at least one second")]
    ZeroTimeout,
}

/// One configuration layer. Unset keys fall through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub state_dir: Option<PathBuf>,
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_owned(), source })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path: path.to_owned(), source })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind: env::bind(),
            port: env::port()?,
            api_key: env::api_key(),
            timeout_secs: env::timeout_secs()?,
            state_dir: env::state_dir_override(),
        })
    }

    /// Keys set in `self` win over `lower`.
    pub fn over(self, lower: Settings) -> Settings {
        Settings {
            bind: self.bind.or(lower.bind),
            port: self.port.or(lower.port),
            api_key: self.api_key.or(lower.api_key),
            timeout_secs: self.timeout_secs.or(lower.timeout_secs),
            state_dir: self.state_dir.or(lower.state_dir),
        }
    }
}

/// Daemon configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: String,
    pub port: u16,
    /// Shared secret for `/api/*`; `None` disables authentication.
    pub api_key: Option<String>,
    /// Default deadline for every invocation
    pub timeout: Duration,
    /// Root state directory (e.g. ~/.local/state/sr)
    pub state_dir: PathBuf,
    /// One JSON record per scan id
    pub scans_dir: PathBuf,
    /// Per-scan artifacts (resource scripts, tool output files)
    pub work_dir: PathBuf,
    /// Daily daemon log files
    pub logs_dir: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
}

impl Config {
    /// Defaults rooted at `state_dir`.
    pub fn for_state_dir(state_dir: impl Into<PathBuf>) -> Self {
        let state_dir = state_dir.into();
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            scans_dir: state_dir.join("scans"),
            work_dir: state_dir.join("work"),
            logs_dir: state_dir.join("logs"),
            lock_path: state_dir.join("srd.pid"),
            state_dir,
        }
    }

    /// Resolve the full layer stack. `flags` is the command-line layer.
    pub fn load(file: Option<&Path>, flags: Settings) -> Result<Self, ConfigError> {
        let mut layered = flags.over(Settings::from_env()?);
        if let Some(path) = file {
            layered = layered.over(Settings::from_file(path)?);
        }
        Self::resolve(layered)
    }

    pub fn resolve(settings: Settings) -> Result<Self, ConfigError> {
        let state_dir = match settings.state_dir {
            Some(dir) => dir,
            None => env::state_dir()?,
        };
        let mut config = Self::for_state_dir(state_dir);
        if let Some(bind) = settings.bind {
            config.bind = bind;
        }
        if let Some(port) = settings.port {
            config.port = port;
        }
        config.api_key = settings.api_key.filter(|key| !key.is_empty());
        if let Some(secs) = settings.timeout_secs {
            if secs == 0 {
                return Err(ConfigError::ZeroTimeout);
            }
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// `host:port` for binding.
    pub fn addr(&self) -> String {
        if self.bind.contains(':') && !self.bind.starts_with('[') {
            format!("[{}]:{}", self.bind, self.port)
        } else {
            format!("{}:{}", self.bind, self.port)
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
