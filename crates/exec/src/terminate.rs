// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Escalating termination: SIGTERM to the process group, a grace period,
//! then SIGKILL.

use std::time::Duration;

use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use tokio::process::Child;

/// How a termination request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The child had already exited; nothing was sent.
    AlreadyExited,
    /// The child exited within the grace period after SIGTERM. The rest of
    /// its group is still killed.
    Terminated,
    /// The child ignored SIGTERM and was killed.
    Killed,
}

/// Terminate `child` and its process group.
///
/// Safe to call more than once: a reaped child reports `AlreadyExited`.
pub(crate) async fn escalate(child: &mut Child, grace: Duration) -> Termination {
    if matches!(child.try_wait(), Ok(Some(_))) {
        return Termination::AlreadyExited;
    }
    let Some(pid) = child.id() else {
        return Termination::AlreadyExited;
    };

    signal_group(pid, Signal::SIGTERM);
    if tokio::time::timeout(grace, child.wait()).await.is_ok() {
        // The leader is gone but members that ignored SIGTERM may remain.
        signal_group(pid, Signal::SIGKILL);
        return Termination::Terminated;
    }

    tracing::warn!(pid, grace_ms = grace.as_millis() as u64, "process ignored SIGTERM, killing");
    signal_group(pid, Signal::SIGKILL);
    if let Err(e) = child.start_kill() {
        tracing::debug!(pid, error = %e, "start_kill after SIGKILL");
    }
    if let Err(e) = child.wait().await {
        tracing::warn!(pid, error = %e, "wait after SIGKILL failed");
    }
    Termination::Killed
}

/// Send `signal` to the process group led by `pid`.
///
/// Children are spawned with `process_group(0)`, so the group id equals the
/// leader's pid. A vanished group (ESRCH) is not an error.
pub(crate) fn signal_group(pid: u32, signal: Signal) {
    let Ok(raw) = i32::try_from(pid) else {
        return;
    };
    match killpg(Pid::from_raw(raw), signal) {
        Ok(()) | Err(nix::errno::Errno::ESRCH) => {}
        Err(e) => tracing::debug!(pid, %signal, error = %e, "killpg failed"),
    }
}
