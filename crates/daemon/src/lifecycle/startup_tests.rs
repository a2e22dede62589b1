// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use fs2::FileExt;
use serde_json::Map;
use sr_core::ScanStatus;
use tempfile::{tempdir, TempDir};

fn test_config(dir: &TempDir) -> Config {
    let mut config = Config::for_state_dir(dir.path().join("state"));
    config.port = 0;
    config
}

#[tokio::test]
async fn startup_creates_layout_and_writes_pid() {
    let dir = tempdir().unwrap();
    let config = test_config(&dir);

    let result = startup(&config).await.unwrap();
    assert!(config.scans_dir.is_dir());
    assert!(config.work_dir.is_dir());
    assert!(config.logs_dir.is_dir());
    let pid = std::fs::read_to_string(&config.lock_path).unwrap();
    assert_eq!(pid.trim(), std::process::id().to_string());
    assert_ne!(result.listener.local_addr().unwrap().port(), 0);
    assert!(result.interrupted.is_empty());

    result.daemon.shutdown();
    assert!(!config.lock_path.exists());
}

#[tokio::test]
async fn startup_lock_failed_does_not_remove_existing_files() {
    // Simulate a running daemon by holding the lock.
    // A second startup attempt must fail without deleting its PID file.
    let dir = tempdir().unwrap();
    let config = test_config(&dir);
    std::fs::create_dir_all(&config.state_dir).unwrap();

    let lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)
        .unwrap();
    lock_file.try_lock_exclusive().unwrap();
    std::fs::write(&config.lock_path, "12345\n").unwrap();

    let err = startup(&config).await.err().unwrap();
    assert!(matches!(err, LifecycleError::LockFailed(_)), "{err}");
    assert_eq!(std::fs::read_to_string(&config.lock_path).unwrap(), "12345\n");
}

#[tokio::test]
async fn startup_reports_interrupted_scans() {
    let dir = tempdir().unwrap();
    let config = test_config(&dir);
    {
        let ledger = ScanLedger::open(&config.scans_dir).unwrap();
        let open = ledger.begin("nmap", Map::new(), "10.0.0.1").unwrap();
        let done = ledger.begin("nikto", Map::new(), "10.0.0.1").unwrap();
        ledger.fail(&done, "finished elsewhere").unwrap();
        assert_eq!(ledger.get(&open).unwrap().unwrap().status, ScanStatus::Started);
    }

    let result = startup(&config).await.unwrap();
    assert_eq!(result.interrupted.len(), 1);
    assert_eq!(result.interrupted[0].tool, "nmap");
    // Interrupted records are reported, not rewritten.
    assert_eq!(result.daemon.ledger.open_scans().len(), 1);
}

#[tokio::test]
async fn startup_sweeps_leftover_artifacts() {
    let dir = tempdir().unwrap();
    let config = test_config(&dir);
    std::fs::create_dir_all(&config.work_dir).unwrap();
    std::fs::write(config.work_dir.join("msf_abc.rc"), "use x\n").unwrap();
    std::fs::write(config.work_dir.join("ffuf_abc.json"), "{}").unwrap();

    let _result = startup(&config).await.unwrap();
    assert_eq!(std::fs::read_dir(&config.work_dir).unwrap().count(), 0);
}

#[tokio::test]
async fn bind_failure_cleans_up_pid_file() {
    let dir = tempdir().unwrap();
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let mut config = test_config(&dir);
    config.port = occupied.local_addr().unwrap().port();

    let err = startup(&config).await.err().unwrap();
    assert!(matches!(err, LifecycleError::BindFailed(..)), "{err}");
    assert!(!config.lock_path.exists());
}
