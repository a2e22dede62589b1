// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable lifecycle record of one invocation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::ScanId;
use crate::outcome::ExecOutcome;

/// Lifecycle state of a scan record.
///
/// `Started` with no end time means the outcome was never recorded: either
/// the invocation is still running or the daemon died while it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    Started,
    Completed,
    Failed,
}

crate::simple_display! {
    ScanStatus {
        Started => "started",
        Completed => "completed",
        Failed => "failed",
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown scan status `{0}` (expected started, completed or failed)")]
pub struct ParseStatusError(pub String);

impl std::str::FromStr for ScanStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "started" => Ok(Self::Started),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Outcome fields kept in the ledger. Output bodies stay with the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub success: bool,
    pub return_code: i32,
    pub stdout_length: usize,
    pub stderr_length: usize,
    pub timed_out: bool,
    #[serde(default)]
    pub partial_results: bool,
}

impl From<&ExecOutcome> for ScanSummary {
    fn from(outcome: &ExecOutcome) -> Self {
        Self {
            success: outcome.success,
            return_code: outcome.return_code,
            stdout_length: outcome.stdout.chars().count(),
            stderr_length: outcome.stderr.chars().count(),
            timed_out: outcome.timed_out,
            partial_results: outcome.partial_results,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub scan_id: ScanId,
    pub tool: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    pub client_ip: String,
    pub status: ScanStatus,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ScanSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanRecord {
    pub fn started(
        scan_id: ScanId,
        tool: impl Into<String>,
        parameters: Map<String, Value>,
        client_ip: impl Into<String>,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            scan_id,
            tool: tool.into(),
            parameters,
            client_ip: client_ip.into(),
            status: ScanStatus::Started,
            start_time,
            end_time: None,
            result: None,
            error: None,
        }
    }

    /// Close the record with a process outcome.
    pub fn complete(&mut self, outcome: &ExecOutcome, now: DateTime<Utc>) {
        self.status = if outcome.success { ScanStatus::Completed } else { ScanStatus::Failed };
        self.end_time = Some(now);
        self.result = Some(ScanSummary::from(outcome));
        self.error = None;
    }

    /// Close the record without a process outcome.
    pub fn fail(&mut self, error: impl Into<String>, now: DateTime<Utc>) {
        self.status = ScanStatus::Failed;
        self.end_time = Some(now);
        self.error = Some(error.into());
    }

    pub fn is_open(&self) -> bool {
        self.status == ScanStatus::Started && self.end_time.is_none()
    }

    /// Best guess at what was scanned, for listings.
    pub fn target_hint(&self) -> Option<&str> {
        ["target", "url", "domain", "query", "hash_file", "module", "command"]
            .iter()
            .find_map(|key| self.parameters.get(*key).and_then(Value::as_str))
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
