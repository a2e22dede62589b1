// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The process runner.

use std::os::unix::process::ExitStatusExt;
use std::time::{Duration, Instant};

use nix::sys::signal::Signal;
use sr_core::{ExecOutcome, FAILED_RETURN_CODE};
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::capture::{Capture, CaptureLimit};
use crate::command::CommandLine;
use crate::error::ExecError;
use crate::terminate::{escalate, signal_group, Termination};

/// Time between SIGTERM and SIGKILL once the deadline passes.
pub const GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Upper bound on waiting for readers after the process group was killed.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Runs one external process to an [`ExecOutcome`].
///
/// No scan identity, no persistence, no retries.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    grace_period: Duration,
    capture: CaptureLimit,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self { grace_period: GRACE_PERIOD, capture: CaptureLimit::Unbounded }
    }
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    sr_core::setters! {
        set { grace_period: Duration, capture: CaptureLimit }
    }

    /// Run `command`, terminating it once `timeout` elapses.
    pub async fn run(&self, command: &CommandLine, timeout: Duration) -> ExecOutcome {
        let span = tracing::info_span!(
            "exec.run",
            cmd = %command,
            timeout_s = timeout.as_secs(),
            return_code = tracing::field::Empty,
            outcome = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );
        let started = Instant::now();
        let outcome = self.run_inner(command, timeout).instrument(span.clone()).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        span.record("return_code", outcome.return_code);
        span.record("outcome", tracing::field::display(outcome.outcome));
        span.record("duration_ms", duration_ms);
        outcome.with_duration(duration_ms)
    }

    async fn run_inner(&self, command: &CommandLine, timeout: Duration) -> ExecOutcome {
        let mut child = match command.to_command().spawn() {
            Ok(child) => child,
            Err(source) => {
                let err = ExecError::SpawnFailed { command: command.program().to_string(), source };
                tracing::warn!(error = %err, "failed to launch");
                return ExecOutcome::launch_failed(err, String::new(), "");
            }
        };
        let pid = child.id();

        let stdout = Capture::new(self.capture);
        let stderr = Capture::new(self.capture);
        let mut readers = Vec::with_capacity(2);
        if let Some(out) = child.stdout.take() {
            readers.push(stdout.spawn_reader(out, "stdout"));
        }
        if let Some(err) = child.stderr.take() {
            readers.push(stderr.spawn_reader(err, "stderr"));
        }

        let deadline = tokio::time::Instant::now() + timeout;
        match tokio::time::timeout_at(deadline, child.wait()).await {
            Ok(Ok(status)) => {
                let joined = tokio::time::timeout_at(deadline, join_all(&mut readers)).await;
                if joined.is_err() {
                    tracing::warn!("output still open after exit, killing process group");
                    if let Some(pid) = pid {
                        signal_group(pid, Signal::SIGKILL);
                    }
                    drain(&mut readers).await;
                }
                let code = status
                    .code()
                    .or_else(|| status.signal().map(|sig| 128 + sig))
                    .unwrap_or(FAILED_RETURN_CODE);
                ExecOutcome::exited(code, stdout.snapshot(), stderr.snapshot())
            }
            Ok(Err(source)) => {
                let err = ExecError::WaitFailed { command: command.program().to_string(), source };
                tracing::warn!(error = %err, "wait failed");
                escalate(&mut child, self.grace_period).await;
                drain(&mut readers).await;
                ExecOutcome::launch_failed(err, stdout.snapshot(), &stderr.snapshot())
            }
            Err(_) => {
                tracing::warn!(timeout_s = timeout.as_secs(), "deadline reached, terminating");
                let how = escalate(&mut child, self.grace_period).await;
                if how == Termination::Killed {
                    tracing::warn!("process killed after grace period");
                }
                drain(&mut readers).await;
                ExecOutcome::timed_out(stdout.snapshot(), stderr.snapshot())
            }
        }
    }
}

async fn join_all(readers: &mut [JoinHandle<()>]) {
    for reader in readers.iter_mut() {
        if reader.is_finished() {
            continue;
        }
        if let Err(e) = reader.await {
            tracing::debug!(error = %e, "output reader task ended abnormally");
        }
    }
}

/// Join readers for a bounded time, then abort any still blocked.
async fn drain(readers: &mut [JoinHandle<()>]) {
    if tokio::time::timeout(DRAIN_TIMEOUT, join_all(readers)).await.is_err() {
        tracing::warn!("output readers did not finish, abandoning remaining output");
        for reader in readers.iter() {
            reader.abort();
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
