// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use axum::extract::State;
use axum::Json;
use indexmap::IndexMap;
use serde::Serialize;

use crate::state::AppState;
use crate::tools::registry;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    /// Tool name → binary found on `PATH`, in registry order.
    pub tools_status: IndexMap<&'static str, bool>,
    pub all_essential_tools_available: bool,
    /// Ledger records still in `started`.
    pub open_scans: usize,
}

/// `GET /health`. Always 200 while the server is up.
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    let mut tools_status = IndexMap::new();
    let mut all_essential = true;
    for spec in registry() {
        let available = binary_on_path(spec.binary);
        if spec.essential && !available {
            all_essential = false;
        }
        tools_status.insert(spec.name, available);
    }
    Json(Health {
        status: "healthy",
        message: "Security tool runner is running",
        version: env!("CARGO_PKG_VERSION"),
        tools_status,
        all_essential_tools_available: all_essential,
        open_scans: state.ledger().open_scans().len(),
    })
}

/// True if an executable file named `binary` is in one of the `PATH`
/// directories.
pub fn binary_on_path(binary: &str) -> bool {
    let Some(path) = std::env::var_os("PATH") else { return false };
    std::env::split_paths(&path).any(|dir| is_executable(&dir.join(binary)))
}

fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}
