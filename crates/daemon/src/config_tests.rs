// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use tempfile::TempDir;

const VARS: &[&str] = &["SR_BIND", "SR_PORT", "SR_API_KEY", "SR_TIMEOUT_SECS", "SR_STATE_DIR"];

/// Clears every SR_* variable on creation and on drop.
struct EnvGuard;

impl EnvGuard {
    fn new() -> Self {
        for var in VARS {
            std::env::remove_var(var);
        }
        EnvGuard
    }

    fn set(&self, var: &str, value: &str) {
        std::env::set_var(var, value);
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in VARS {
            std::env::remove_var(var);
        }
    }
}

fn write_toml(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("srd.toml");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn derived_paths_live_under_state_dir() {
    let config = Config::for_state_dir("/var/lib/sr");
    assert_eq!(config.scans_dir, PathBuf::from("/var/lib/sr/scans"));
    assert_eq!(config.work_dir, PathBuf::from("/var/lib/sr/work"));
    assert_eq!(config.logs_dir, PathBuf::from("/var/lib/sr/logs"));
    assert_eq!(config.lock_path, PathBuf::from("/var/lib/sr/srd.pid"));
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    assert_eq!(config.addr(), "127.0.0.1:5000");
}

#[test]
#[serial]
fn defaults_apply_without_any_layer() {
    let env = EnvGuard::new();
    env.set("SR_STATE_DIR", "/tmp/sr-defaults");
    let config = Config::load(None, Settings::default()).unwrap();
    assert_eq!(config, Config::for_state_dir("/tmp/sr-defaults"));
}

#[test]
#[serial]
fn later_layers_win() {
    let env = EnvGuard::new();
    let dir = TempDir::new().unwrap();
    let file = write_toml(
        &dir,
        r#"
bind = "0.0.0.0"
port = 6000
timeout_secs = 60
api_key = "from-file"
state_dir = "/tmp/from-file"
"#,
    );
    env.set("SR_PORT", "7000");
    env.set("SR_API_KEY", "from-env");
    let flags = Settings { api_key: Some("from-flag".into()), ..Settings::default() };

    let config = Config::load(Some(&file), flags).unwrap();
    assert_eq!(config.bind, "0.0.0.0");
    assert_eq!(config.port, 7000);
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.api_key.as_deref(), Some("from-flag"));
    assert_eq!(config.state_dir, PathBuf::from("/tmp/from-file"));
}

#[test]
#[serial]
fn invalid_env_value_is_reported() {
    let env = EnvGuard::new();
    env.set("SR_PORT", "not-a-port");
    let err = Config::load(None, Settings::default()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnv { var: "SR_PORT", .. }), "{err}");
}

#[test]
#[serial]
fn unknown_file_key_is_rejected() {
    let _env = EnvGuard::new();
    let dir = TempDir::new().unwrap();
    let file = write_toml(&dir, "prot = 5000\n");
    let err = Config::load(Some(&file), Settings::default()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
}

#[test]
#[serial]
fn missing_file_is_reported() {
    let _env = EnvGuard::new();
    let err = Config::load(Some(Path::new("/nonexistent/srd.toml")), Settings::default()).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }), "{err}");
}

#[yare::parameterized(
    unset = { None, None },
    empty = { Some(""), None },
    set   = { Some("s3cret"), Some("s3cret") },
)]
fn empty_api_key_disables_auth(key: Option<&str>, expected: Option<&str>) {
    let settings = Settings {
        api_key: key.map(str::to_string),
        state_dir: Some("/tmp/sr".into()),
        ..Settings::default()
    };
    assert_eq!(Config::resolve(settings).unwrap().api_key.as_deref(), expected);
}

#[test]
fn zero_timeout_is_rejected() {
    let settings =
        Settings { timeout_secs: Some(0), state_dir: Some("/tmp/sr".into()), ..Settings::default() };
    assert!(matches!(Config::resolve(settings), Err(ConfigError::ZeroTimeout)));
}

#[yare::parameterized(
    ipv4 = { "0.0.0.0", "0.0.0.0:5000" },
    ipv6 = { "::1", "[::1]:5000" },
    host = { "localhost", "localhost:5000" },
)]
fn addr_formats_bind(bind: &str, expected: &str) {
    let mut config = Config::for_state_dir("/tmp/sr");
    config.bind = bind.to_string();
    assert_eq!(config.addr(), expected);
}
