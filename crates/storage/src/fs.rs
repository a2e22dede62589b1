// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File helpers shared by both stores.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

/// Replace `path` with `bytes` via a uniquely named temp file and rename.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = tmp_path(path);
    let result = std::fs::write(&tmp, bytes).and_then(|_| std::fs::rename(&tmp, path));
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    result
}

/// Write `bytes` to `path`, failing with `AlreadyExists` if it is taken.
pub(crate) fn write_new(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = std::fs::OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(bytes)?;
    file.sync_data()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{}.tmp", nanoid::nanoid!(8)));
    path.with_file_name(name)
}

/// Read every `*.json` file in `dir` accepted by `keep`, skipping (and
/// logging) files that cannot be read or parsed. A missing directory is empty.
pub(crate) fn scan_json_dir<T, F>(dir: &Path, what: &str, keep: F) -> Vec<(PathBuf, T)>
where
    T: DeserializeOwned,
    F: Fn(&str) -> bool,
{
    let mut out = Vec::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return out,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "failed to read {what} directory");
            return out;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };
        if !name.ends_with(".json") || !keep(&name) {
            continue;
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<T>(&content) {
                Ok(value) => out.push((path, value)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping corrupt {what} file");
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read {what} file");
            }
        }
    }

    out
}
