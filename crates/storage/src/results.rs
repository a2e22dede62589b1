// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client-side result corpus: one write-once JSON file per invocation.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sr_core::{is_safe_file_component, micro_stamp, slug, Clock, ResultOutcome, SystemClock};

use crate::analysis::AggregateReport;
use crate::error::StoreError;
use crate::fs::{scan_json_dir, write_atomic, write_new};

/// File name used by `sr export` when none is given.
pub const DEFAULT_SUMMARY_FILE: &str = "scan_summary.json";

/// Files containing this marker are hand-written samples, not results.
const EXAMPLE_MARKER: &str = "EXAMPLE_";

/// Longest sanitized target kept in a file name, in bytes. The rest of the
/// name stays well inside the 255-byte limit most filesystems impose.
const MAX_TARGET_BYTES: usize = 120;

/// Full copy of one invocation's outcome as seen by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub tool: String,
    #[serde(default)]
    pub target: String,
    pub timestamp: String,
    pub datetime: DateTime<Utc>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub return_code: Option<i32>,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(default)]
    pub partial_results: bool,
    #[serde(default)]
    pub rate_limited: bool,
    #[serde(default)]
    pub retry_after: Option<String>,
    #[serde(default)]
    pub concurrent_limit_reached: bool,
    #[serde(default)]
    pub scan_id: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub parsed_output: Option<Value>,
}

impl ResultRecord {
    pub fn from_outcome(tool: &str, target: &str, outcome: &ResultOutcome, at: DateTime<Utc>) -> Self {
        let body = outcome.response();
        Self {
            tool: tool.to_string(),
            target: target.to_string(),
            timestamp: micro_stamp(at),
            datetime: at,
            success: outcome.success(),
            return_code: body.and_then(|b| b.return_code),
            stdout: body.map(|b| b.stdout.clone()).unwrap_or_default(),
            stderr: body.map(|b| b.stderr.clone()).unwrap_or_default(),
            error: outcome.error(),
            timed_out: body.is_some_and(|b| b.timed_out),
            partial_results: body.is_some_and(|b| b.partial_results),
            rate_limited: outcome.is_rate_limited(),
            retry_after: outcome.retry_after().map(str::to_string),
            concurrent_limit_reached: outcome.is_capacity_reached(),
            scan_id: body.and_then(|b| b.scan_id.as_ref()).map(ToString::to_string),
            status_code: outcome.status_code(),
            parsed_output: body.and_then(|b| b.parsed_output.clone()),
        }
    }
}

/// Replace characters that are unsafe or awkward in file names with `_`.
///
/// The result is cut on a char boundary at `MAX_TARGET_BYTES` bytes.
pub fn sanitize_target(target: &str) -> String {
    let mut cleaned = String::new();
    for c in target.chars() {
        let c = match c {
            '/' | ':' | '\\' | '?' | '&' | '\0' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        };
        if cleaned.len() + c.len_utf8() > MAX_TARGET_BYTES {
            break;
        }
        cleaned.push(c);
    }
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}

/// Directory of [`ResultRecord`] files.
#[derive(Debug, Clone)]
pub struct ResultStore<C: Clock = SystemClock> {
    dir: PathBuf,
    clock: C,
}

impl ResultStore<SystemClock> {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(dir, SystemClock)
    }
}

impl<C: Clock> ResultStore<C> {
    pub fn with_clock(dir: impl Into<PathBuf>, clock: C) -> Self {
        Self { dir: dir.into(), clock }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist one outcome, success or failure. Never overwrites an existing
    /// file; a name collision gets a `-N` suffix.
    pub fn persist(&self, tool: &str, target: &str, outcome: &ResultOutcome) -> Result<PathBuf, StoreError> {
        let record = ResultRecord::from_outcome(tool, target, outcome, self.clock.utc_now());
        self.persist_record(&record)
    }

    pub fn persist_record(&self, record: &ResultRecord) -> Result<PathBuf, StoreError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;
        let json = serde_json::to_vec_pretty(record)?;
        let stem = format!("{}_{}_{}", slug(&record.tool), sanitize_target(&record.target), record.timestamp);

        for n in 1..=100u32 {
            let name =
                if n == 1 { format!("{stem}.json") } else { format!("{stem}-{n}.json") };
            let path = self.dir.join(name);
            match write_new(&path, &json) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), tool = %record.tool, "result saved");
                    return Ok(path);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(source) => return Err(StoreError::Io { path, source }),
            }
        }
        Err(StoreError::NameExhausted(stem))
    }

    /// Every stored result, oldest first. Sample files, the summary export
    /// and unreadable files are skipped.
    pub fn load_all(&self) -> Vec<ResultRecord> {
        let mut records: Vec<ResultRecord> = scan_json_dir(&self.dir, "result", |name| {
            !name.contains(EXAMPLE_MARKER) && name != DEFAULT_SUMMARY_FILE
        })
        .into_iter()
        .map(|(_, record)| record)
        .collect();
        records.sort_by(|a, b| a.datetime.cmp(&b.datetime));
        records
    }

    /// Write `report` plus generation metadata to `file_name` in the results
    /// directory.
    pub fn export_summary(&self, report: &AggregateReport, file_name: &str) -> Result<PathBuf, StoreError> {
        if !is_safe_file_component(file_name) {
            return Err(StoreError::InvalidFileName(file_name.to_string()));
        }
        let mut doc = serde_json::to_value(report)?;
        if let Value::Object(map) = &mut doc {
            map.insert("generated_at".into(), Value::String(self.clock.utc_now().to_rfc3339()));
            map.insert("total_results_files".into(), Value::from(report.total));
        }
        std::fs::create_dir_all(&self.dir)
            .map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;
        let path = self.dir.join(file_name);
        write_atomic(&path, &serde_json::to_vec_pretty(&doc)?)
            .map_err(|source| StoreError::Io { path: path.clone(), source })?;
        tracing::info!(path = %path.display(), "summary exported");
        Ok(path)
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod tests;
