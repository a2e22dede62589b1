// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, shutdown, crash discovery.

mod startup;
pub use startup::startup;

use std::fs::File;
use std::sync::Arc;
use std::time::Instant;

use sr_core::ScanRecord;
use sr_storage::{LedgerError, ScanLedger};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::Config;

/// Daemon state during operation.
pub struct DaemonState {
    /// Configuration
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    /// Scan ledger shared with the HTTP handlers
    pub ledger: Arc<ScanLedger>,
    /// When daemon started
    pub start_time: Instant,
}

/// Result of daemon startup: the daemon state plus the bound listener.
pub struct StartupResult {
    pub daemon: DaemonState,
    pub listener: TcpListener,
    /// Records a previous daemon left in `started`.
    pub interrupted: Vec<ScanRecord>,
}

impl DaemonState {
    /// Release the lock and remove the PID file.
    ///
    /// Running scans are not waited for here; the HTTP server's graceful
    /// shutdown already let in-flight requests finish.
    pub fn shutdown(self) {
        if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
            warn!(path = %self.config.lock_path.display(), error = %e, "failed to remove PID file");
        }
        info!(uptime_s = self.start_time.elapsed().as_secs(), "Daemon stopped");
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Failed to bind {0}: {1}")]
    BindFailed(String, std::io::Error),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Cancel `token` on the first Ctrl-C or SIGTERM.
pub fn spawn_signal_handler(token: CancellationToken) {
    tokio::spawn(async move {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => info!("Received Ctrl-C, shutting down"),
                    _ = term.recv() => info!("Received SIGTERM, shutting down"),
                }
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable, waiting for Ctrl-C only");
                let _ = tokio::signal::ctrl_c().await;
                info!("Received Ctrl-C, shutting down");
            }
        }
        token.cancel();
    });
}

#[cfg(test)]
#[path = "startup_tests.rs"]
mod tests;
