// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon startup and initialization logic.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use fs2::FileExt;
use sr_storage::ScanLedger;
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::{Config, DaemonState, LifecycleError, StartupResult};

/// Start the daemon
pub async fn startup(config: &Config) -> Result<StartupResult, LifecycleError> {
    match startup_inner(config).await {
        Ok(result) => Ok(result),
        Err(e) => {
            // Don't clean up if we failed to acquire the lock:
            // the PID file belongs to the already-running daemon.
            if !matches!(e, LifecycleError::LockFailed(_)) {
                cleanup_on_failure(config);
            }
            Err(e)
        }
    }
}

/// Inner startup logic - cleanup_on_failure called if this fails
async fn startup_inner(config: &Config) -> Result<StartupResult, LifecycleError> {
    // 1. Create state directory (needed for the lock file)
    std::fs::create_dir_all(&config.state_dir)?;

    // 2. Acquire lock file FIRST - prevents two daemons sharing a ledger.
    // Use OpenOptions to avoid truncating the file before we hold the lock,
    // which would wipe the running daemon's PID.
    let lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)?;
    lock_file.try_lock_exclusive().map_err(LifecycleError::LockFailed)?;

    // Write PID to lock file (truncate now that we hold the lock)
    let mut lock_file = lock_file;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;
    let lock_file = lock_file; // Drop mutability

    // 3. Create directories
    std::fs::create_dir_all(&config.scans_dir)?;
    std::fs::create_dir_all(&config.work_dir)?;
    std::fs::create_dir_all(&config.logs_dir)?;

    // 4. Artifacts of scans that were running when the last daemon died
    let swept = sweep_work_dir(&config.work_dir);
    if swept > 0 {
        info!(count = swept, "Removed leftover scan artifacts");
    }

    // 5. Open the ledger and report scans a crash left open
    let ledger = Arc::new(ScanLedger::open(&config.scans_dir)?);
    let interrupted = ledger.open_scans();
    for record in &interrupted {
        warn!(
            scan_id = %record.scan_id,
            tool = %record.tool,
            started = %record.start_time,
            "Scan never completed; interrupted by a previous daemon exit",
        );
    }
    if !interrupted.is_empty() {
        info!(count = interrupted.len(), "Found interrupted scans");
    }

    // 6. Bind (LAST - only after all validation passes)
    let addr = config.addr();
    let listener =
        TcpListener::bind(&addr).await.map_err(|e| LifecycleError::BindFailed(addr.clone(), e))?;

    info!(addr = %addr, scans_dir = %config.scans_dir.display(), "Daemon started");

    Ok(StartupResult {
        daemon: DaemonState {
            config: config.clone(),
            lock_file,
            ledger,
            start_time: Instant::now(),
        },
        listener,
        interrupted,
    })
}

/// Remove every regular file in `dir`. Returns how many were removed.
fn sweep_work_dir(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else { return 0 };
    let mut removed = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => warn!(path = %path.display(), error = %e, "failed to remove leftover artifact"),
        }
    }
    removed
}

/// Clean up resources on startup failure
fn cleanup_on_failure(config: &Config) {
    // Remove PID/lock file
    if config.lock_path.exists() {
        let _ = std::fs::remove_file(&config.lock_path);
    }
}
