// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the scan ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error on {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("corrupt scan record {path}: {source}")]
    Corrupt { path: PathBuf, source: serde_json::Error },
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not allocate a scan id for `{tool}` after {attempts} attempts")]
    IdExhausted { tool: String, attempts: u32 },
}

/// Errors from the result store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid file name `{0}`")]
    InvalidFileName(String),
    #[error("could not find a free file name for {0}")]
    NameExhausted(String),
}
