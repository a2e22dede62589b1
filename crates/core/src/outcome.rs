// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation outcome and its classification.
//!
//! The constructors here are the only place the classification rule lives:
//! a timed-out run that captured any output is reported as a success with
//! partial results, a timed-out run with nothing captured is a failure, and a
//! launch failure is a failure that never counts as a timeout.

use serde::{Deserialize, Serialize};

/// Return code reported for timed-out runs and launch failures.
pub const FAILED_RETURN_CODE: i32 = -1;

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Succeeded,
    Failed,
    TimedOutWithPartialResults,
    TimedOutWithoutResults,
    LaunchFailed,
}

crate::simple_display! {
    OutcomeKind {
        Succeeded => "succeeded",
        Failed => "failed",
        TimedOutWithPartialResults => "timed_out_with_partial_results",
        TimedOutWithoutResults => "timed_out_without_results",
        LaunchFailed => "launch_failed",
    }
}

/// Final, immutable result of one external process execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecOutcome {
    pub stdout: String,
    pub stderr: String,
    pub return_code: i32,
    pub success: bool,
    pub timed_out: bool,
    pub partial_results: bool,
    pub outcome: OutcomeKind,
    #[serde(default)]
    pub duration_ms: u64,
}

impl ExecOutcome {
    /// Process exited on its own before the deadline.
    pub fn exited(return_code: i32, stdout: String, stderr: String) -> Self {
        let success = return_code == 0;
        Self {
            stdout,
            stderr,
            return_code,
            success,
            timed_out: false,
            partial_results: false,
            outcome: if success { OutcomeKind::Succeeded } else { OutcomeKind::Failed },
            duration_ms: 0,
        }
    }

    /// Process was terminated after the deadline expired.
    pub fn timed_out(stdout: String, stderr: String) -> Self {
        let partial = !stdout.is_empty() || !stderr.is_empty();
        Self {
            stdout,
            stderr,
            return_code: FAILED_RETURN_CODE,
            success: partial,
            timed_out: true,
            partial_results: partial,
            outcome: if partial {
                OutcomeKind::TimedOutWithPartialResults
            } else {
                OutcomeKind::TimedOutWithoutResults
            },
            duration_ms: 0,
        }
    }

    /// Process could not be started, or failed before producing a status.
    ///
    /// `stderr` is whatever was captured before the failure (usually empty).
    pub fn launch_failed(error: impl std::fmt::Display, stdout: String, stderr: &str) -> Self {
        let mut message = format!("Error executing command: {error}");
        if !stderr.is_empty() {
            message.push('\n');
            message.push_str(stderr);
        }
        Self {
            stdout,
            stderr: message,
            return_code: FAILED_RETURN_CODE,
            success: false,
            timed_out: false,
            partial_results: false,
            outcome: OutcomeKind::LaunchFailed,
            duration_ms: 0,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// True when either stream captured at least one byte.
    pub fn has_output(&self) -> bool {
        !self.stdout.is_empty() || !self.stderr.is_empty()
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
