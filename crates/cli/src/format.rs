// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plain-text rendering of tool outcomes and result-corpus reports.

use std::fmt::{self, Write as _};
use std::path::Path;

use sr_core::{truncate_chars, ResultOutcome, ScanRecord};
use sr_storage::{AggregateReport, ResultRecord};

/// Partial output shown under an error banner.
pub const PARTIAL_OUTPUT_CHARS: usize = 5000;

/// Output preview per result in `sr target`.
pub const PREVIEW_CHARS: usize = 200;

const WIDTH: usize = 80;

fn rule(c: char) -> String {
    c.to_string().repeat(WIDTH)
}

/// Report for one tool invocation.
pub struct Report<'a> {
    title: String,
    outcome: &'a ResultOutcome,
    saved_to: Option<&'a Path>,
}

impl<'a> Report<'a> {
    pub fn new(title: impl Into<String>, outcome: &'a ResultOutcome) -> Self {
        Self { title: title.into(), outcome, saved_to: None }
    }

    sr_core::setters! {
        into { saved_to: Option<&'a Path> }
    }

    fn body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.outcome;
        if outcome.is_rate_limited() {
            writeln!(f, "RATE LIMIT REACHED")?;
            writeln!(f, "Status: Rate limit exceeded")?;
            writeln!(f, "Retry After: {}", outcome.retry_after().unwrap_or("Unknown"))?;
            writeln!(f)?;
            return writeln!(f, "Please wait before running additional scans.");
        }
        if outcome.is_capacity_reached() {
            writeln!(f, "CONCURRENT SCAN LIMIT REACHED")?;
            writeln!(f, "Status: Maximum concurrent scans running")?;
            writeln!(f)?;
            return writeln!(f, "Please wait for running scans to complete before starting new ones.");
        }

        let body = outcome.response();
        let stdout = body.map_or("", |b| b.stdout.as_str());
        if !outcome.success() {
            if let Some(error) = outcome.error() {
                writeln!(f, "ERROR: {error}")?;
                if !stdout.is_empty() {
                    writeln!(f, "\nPARTIAL OUTPUT:\n{}", rule('-'))?;
                    write!(f, "{}", truncate_chars(stdout, PARTIAL_OUTPUT_CHARS))?;
                    if stdout.chars().count() > PARTIAL_OUTPUT_CHARS {
                        write!(f, "\n... (output truncated for readability)")?;
                    }
                    writeln!(f)?;
                }
                return Ok(());
            }
        }

        let timed_out = body.is_some_and(|b| b.timed_out);
        if timed_out && body.is_some_and(|b| b.partial_results) {
            writeln!(f, "SCAN TIMED OUT (Partial Results Available)\n")?;
        }
        if outcome.success() {
            writeln!(f, "SCAN COMPLETED SUCCESSFULLY\n")?;
        }
        if !stdout.is_empty() {
            writeln!(f, "OUTPUT:\n{}", rule('-'))?;
            writeln!(f, "{stdout}")?;
            writeln!(f, "{}", rule('-'))?;
        }
        let stderr = body.map_or("", |b| b.stderr.as_str());
        if !stderr.trim().is_empty() {
            writeln!(f, "\nWARNINGS/ERRORS:\n{}", rule('-'))?;
            writeln!(f, "{stderr}")?;
            writeln!(f, "{}", rule('-'))?;
        }
        match body.and_then(|b| b.return_code) {
            Some(code) => writeln!(f, "\nReturn Code: {code}")?,
            None => writeln!(f, "\nReturn Code: N/A")?,
        }
        if timed_out {
            writeln!(f, "Note: Scan timed out but partial results are shown above.")?;
        }
        writeln!(f, "\n{}", rule('='))
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{}", rule('='))?;
        writeln!(f, "{} SCAN REPORT", self.title.to_uppercase())?;
        writeln!(f, "{}\n", rule('='))?;
        self.body(f)?;

        if let Some(path) = self.saved_to {
            writeln!(f, "\nResults saved to: {}", path.display())?;
        }
        if let Some(scan_id) = self.outcome.response().and_then(|b| b.scan_id.as_ref()) {
            writeln!(f, "Scan ID: {scan_id}")?;
            writeln!(f, "   Use `sr show {scan_id}` to retrieve this scan later.")?;
        }
        Ok(())
    }
}

/// Text view of an aggregate report.
pub fn analysis(report: &AggregateReport) -> String {
    let mut out = String::new();
    let thin = rule('-');
    let _ = writeln!(out, "\n{}\nSCAN RESULTS ANALYSIS\n{}\n", rule('='), rule('='));
    let _ = writeln!(out, "SUMMARY\n{thin}");
    let _ = writeln!(out, "Total scans: {}", report.total);
    let _ = writeln!(out, "Successful: {} ({:.1}%)", report.successful, report.success_rate);
    let _ = writeln!(out, "Failed: {}", report.failed);
    let _ = writeln!(out, "Rate limited: {}", report.rate_limited);
    let _ = writeln!(out, "Timed out: {}\n", report.timed_out);

    let _ = writeln!(out, "SCANS BY TOOL\n{thin}");
    for (tool, stats) in &report.by_tool {
        let _ = writeln!(
            out,
            "{tool:20}: {:3} total, {:3} success, {:3} failed",
            stats.total, stats.success, stats.failed
        );
    }
    out.push('\n');

    if !report.top_targets.is_empty() {
        let _ = writeln!(out, "TOP {} TARGETS\n{thin}", report.top_targets.len());
        for item in &report.top_targets {
            let _ = writeln!(out, "{:50}: {:3} scans", item.target, item.count);
        }
        out.push('\n');
    }

    if !report.failed_scans.is_empty() {
        let _ = writeln!(out, "FAILED SCANS ({} shown)\n{thin}", report.failed_scans.len());
        for scan in &report.failed_scans {
            let _ = writeln!(out, "Tool: {}", scan.tool);
            let _ = writeln!(out, "Target: {}", scan.target);
            let _ = writeln!(out, "Time: {}", scan.datetime.to_rfc3339());
            let _ = writeln!(out, "Error: {}", scan.error);
            if !scan.stderr.is_empty() {
                let _ = writeln!(out, "Stderr: {}...", scan.stderr);
            }
            let _ = writeln!(out, "{thin}");
        }
    }
    let _ = writeln!(out, "{}", rule('='));
    out
}

/// Text view of the stored results matching `needle`.
pub fn target_results(needle: &str, records: &[&ResultRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}\nSCAN RESULTS FOR: {needle}\n{}\n", rule('='), rule('='));
    let _ = writeln!(out, "Found {} scan(s)\n", records.len());
    for (i, record) in records.iter().enumerate() {
        let mark = if record.success { "ok" } else { "FAILED" };
        let _ = writeln!(out, "{}. [{mark}] {}", i + 1, record.tool.to_uppercase());
        let _ = writeln!(out, "   Time: {}", record.datetime.to_rfc3339());
        let _ = writeln!(out, "   Success: {}", record.success);
        if !record.success {
            let _ = writeln!(out, "   Error: {}", record.error.as_deref().unwrap_or("Unknown error"));
        }
        if let Some(scan_id) = &record.scan_id {
            let _ = writeln!(out, "   Scan ID: {scan_id}");
        }
        if !record.stdout.is_empty() {
            let preview = truncate_chars(&record.stdout, PREVIEW_CHARS).replace('\n', " ");
            let _ = writeln!(out, "   Output: {preview}...");
        }
        let _ = writeln!(out, "{}\n", rule('-'));
    }
    out
}

/// Text view of one ledger record.
pub fn scan_details(record: &ScanRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}\nSCAN DETAILS: {}\n{}\n", rule('='), record.scan_id, rule('='));
    let _ = writeln!(out, "Tool: {}", record.tool.to_uppercase());
    let _ = writeln!(out, "Caller: {}", record.client_ip);
    let _ = writeln!(out, "Started: {}", record.start_time.to_rfc3339());
    let _ = writeln!(out, "Status: {}", record.status);
    if let Some(end) = record.end_time {
        let _ = writeln!(out, "Completed: {}", end.to_rfc3339());
    } else if record.is_open() {
        let _ = writeln!(out, "Completed: never recorded (still running or interrupted)");
    }
    if !record.parameters.is_empty() {
        let _ = writeln!(out, "\nParameters:");
        for (key, value) in &record.parameters {
            match value.as_str() {
                Some(s) => {
                    let _ = writeln!(out, "   {key}: {s}");
                }
                None => {
                    let _ = writeln!(out, "   {key}: {value}");
                }
            }
        }
    }
    if let Some(error) = &record.error {
        let _ = writeln!(out, "\nError: {error}");
    }
    if let Some(result) = &record.result {
        let _ = writeln!(out, "\n{}\nRESULTS\n{}\n", rule('='), rule('='));
        let _ = writeln!(out, "Success: {}", if result.success { "Yes" } else { "No" });
        let _ = writeln!(out, "Return Code: {}", result.return_code);
        if result.timed_out {
            let _ = writeln!(out, "Note: Scan timed out (partial results may be available)");
        }
        let _ = writeln!(out, "\nOutput Length: {} characters", result.stdout_length);
        let _ = writeln!(out, "Error Length: {} characters", result.stderr_length);
    }
    out
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
