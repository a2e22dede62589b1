// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregate statistics over the result corpus.
//!
//! Reports are always recomputed from the full corpus; an exported summary is
//! a snapshot, never an input.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sr_core::truncate_chars;

use crate::results::ResultRecord;

pub const TOP_TARGETS_LIMIT: usize = 10;
pub const FAILED_SCANS_LIMIT: usize = 20;
pub const STDERR_PREVIEW_CHARS: usize = 200;

const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetCount {
    pub target: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedScan {
    pub tool: String,
    pub target: String,
    pub datetime: DateTime<Utc>,
    pub error: String,
    /// First [`STDERR_PREVIEW_CHARS`] characters of stderr.
    pub stderr: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub rate_limited: usize,
    pub timed_out: usize,
    /// Percentage of successful results, 0.0 for an empty corpus.
    pub success_rate: f64,
    pub by_tool: BTreeMap<String, ToolStats>,
    pub top_targets: Vec<TargetCount>,
    /// Most recent failures first.
    pub failed_scans: Vec<FailedScan>,
}

/// Compute the report for `records`. An empty corpus yields the zero report.
pub fn analyze(records: &[ResultRecord]) -> AggregateReport {
    let mut report = AggregateReport { total: records.len(), ..AggregateReport::default() };
    let mut targets: IndexMap<&str, usize> = IndexMap::new();

    for record in records {
        let stats = report.by_tool.entry(record.tool.clone()).or_default();
        stats.total += 1;
        if record.success {
            report.successful += 1;
            stats.success += 1;
        } else {
            report.failed += 1;
            stats.failed += 1;
        }
        if record.rate_limited {
            report.rate_limited += 1;
        }
        if record.timed_out {
            report.timed_out += 1;
        }
        *targets.entry(record.target.as_str()).or_insert(0) += 1;
    }

    if report.total > 0 {
        report.success_rate = report.successful as f64 * 100.0 / report.total as f64;
    }

    // Stable sort keeps first-seen order among equal counts.
    let mut ranked: Vec<(&str, usize)> = targets.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    report.top_targets = ranked
        .into_iter()
        .take(TOP_TARGETS_LIMIT)
        .map(|(target, count)| TargetCount { target: target.to_string(), count })
        .collect();

    let mut failures: Vec<&ResultRecord> = records.iter().filter(|r| !r.success).collect();
    failures.sort_by(|a, b| b.datetime.cmp(&a.datetime));
    report.failed_scans = failures
        .into_iter()
        .take(FAILED_SCANS_LIMIT)
        .map(|r| FailedScan {
            tool: r.tool.clone(),
            target: r.target.clone(),
            datetime: r.datetime,
            error: r.error.clone().unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            stderr: truncate_chars(&r.stderr, STDERR_PREVIEW_CHARS).to_string(),
        })
        .collect();

    report
}

/// Results whose target contains `needle`, case-insensitively.
pub fn records_for_target<'a>(records: &'a [ResultRecord], needle: &str) -> Vec<&'a ResultRecord> {
    let needle = needle.to_lowercase();
    records.iter().filter(|r| r.target.to_lowercase().contains(&needle)).collect()
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod tests;
