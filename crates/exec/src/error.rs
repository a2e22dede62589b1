// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors that end a run before the process produces an exit status.
//!
//! The runner never returns these; they are rendered into the launch-failure
//! outcome's stderr.

#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// Binary missing, not executable, or fork failed.
    #[error("{source}")]
    SpawnFailed { command: String, source: std::io::Error },

    /// Waiting on the child failed after it was started.
    #[error("failed waiting for `{command}`: {source}")]
    WaitFailed { command: String, source: std::io::Error },
}
