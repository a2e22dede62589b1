// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::{TimeZone, Utc};
use sr_core::test_support::scan_id;
use sr_core::{ExecOutcome, ScanStatus, ToolResponse};
use sr_storage::analyze;

fn completed(outcome: ExecOutcome) -> ResultOutcome {
    let body = ToolResponse::from_outcome(outcome, Some(scan_id("nmap_20260101_120000_127_0_0_1")));
    ResultOutcome::Completed { status: 200, body }
}

#[test]
fn success_report_has_output_and_footer() {
    let outcome = completed(ExecOutcome::exited(0, "22/tcp open ssh".into(), String::new()));
    let path = Path::new("/tmp/results/nmap_10.0.0.1.json");
    let text = Report::new("Nmap Scan: 10.0.0.1", &outcome).saved_to(path).to_string();

    assert!(text.contains("NMAP SCAN: 10.0.0.1 SCAN REPORT"));
    assert!(text.contains("SCAN COMPLETED SUCCESSFULLY"));
    assert!(text.contains("OUTPUT:\n"));
    assert!(text.contains("22/tcp open ssh"));
    assert!(text.contains("Return Code: 0"));
    assert!(!text.contains("WARNINGS/ERRORS"));
    assert!(text.contains("Results saved to: /tmp/results/nmap_10.0.0.1.json"));
    assert!(text.contains("Scan ID: nmap_20260101_120000_127_0_0_1"));
}

#[test]
fn timeout_with_partial_results_is_flagged() {
    let outcome = completed(ExecOutcome::timed_out("half a scan".into(), "warn".into()));
    let text = Report::new("Nmap Scan", &outcome).to_string();

    assert!(text.contains("SCAN TIMED OUT (Partial Results Available)"));
    assert!(text.contains("SCAN COMPLETED SUCCESSFULLY"));
    assert!(text.contains("WARNINGS/ERRORS"));
    assert!(text.contains("Return Code: -1"));
    assert!(text.contains("Note: Scan timed out"));
}

#[test]
fn non_zero_exit_without_error_still_shows_output() {
    let outcome = completed(ExecOutcome::exited(2, String::new(), "bad flag".into()));
    let text = Report::new("Masscan", &outcome).to_string();

    assert!(!text.contains("SCAN COMPLETED SUCCESSFULLY"));
    assert!(text.contains("bad flag"));
    assert!(text.contains("Return Code: 2"));
}

#[yare::parameterized(
    with_header    = { Some("30"), "Retry After: 30" },
    without_header = { None, "Retry After: Unknown" },
)]
fn rate_limit_banner(retry_after: Option<&str>, expected: &str) {
    let outcome = ResultOutcome::RateLimited { retry_after: retry_after.map(str::to_string) };
    let text = Report::new("Nuclei", &outcome).to_string();
    assert!(text.contains("RATE LIMIT REACHED"));
    assert!(text.contains(expected));
    assert!(!text.contains("Return Code"));
}

#[test]
fn capacity_banner() {
    let text = Report::new("Nuclei", &ResultOutcome::CapacityReached).to_string();
    assert!(text.contains("CONCURRENT SCAN LIMIT REACHED"));
    assert!(!text.contains("RATE LIMIT"));
}

#[test]
fn error_banner_truncates_partial_output() {
    let mut body = ToolResponse::from_outcome(ExecOutcome::exited(1, "x".repeat(6000), String::new()), None);
    body.error = Some("scan aborted".into());
    let outcome = ResultOutcome::Completed { status: 200, body };
    let text = Report::new("WhatWeb", &outcome).to_string();

    assert!(text.contains("ERROR: scan aborted"));
    assert!(text.contains("PARTIAL OUTPUT:"));
    assert!(text.contains("... (output truncated for readability)"));
    assert_eq!(text.matches('x').count(), PARTIAL_OUTPUT_CHARS);
}

#[test]
fn transport_error_has_no_return_code() {
    let outcome = ResultOutcome::Error { message: "Request failed: connection refused".into(), status_code: None };
    let text = Report::new("Nmap Scan", &outcome).to_string();
    assert!(text.contains("ERROR: Request failed: connection refused"));
    assert!(!text.contains("Scan ID"));
}

fn record(tool: &str, target: &str, success: bool) -> ResultRecord {
    let outcome = if success {
        completed(ExecOutcome::exited(0, "line one\nline two".into(), String::new()))
    } else {
        ResultOutcome::Error { message: "HTTP error: 500".into(), status_code: Some(500) }
    };
    let at = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    ResultRecord::from_outcome(tool, target, &outcome, at)
}

#[test]
fn analysis_lists_tools_targets_and_failures() {
    let records = vec![record("nmap", "10.0.0.1", true), record("ffuf", "http://x", false)];
    let text = analysis(&analyze(&records));

    assert!(text.contains("Total scans: 2"));
    assert!(text.contains("Successful: 1 (50.0%)"));
    assert!(text.contains("nmap"));
    assert!(text.contains("TOP 2 TARGETS"));
    assert!(text.contains("FAILED SCANS (1 shown)"));
    assert!(text.contains("Error: HTTP error: 500"));
}

#[test]
fn analysis_of_empty_corpus() {
    let text = analysis(&analyze(&[]));
    assert!(text.contains("Total scans: 0"));
    assert!(!text.contains("TOP"));
    assert!(!text.contains("FAILED SCANS"));
}

#[test]
fn target_results_preview_is_single_line() {
    let ok = record("nmap", "10.0.0.1", true);
    let failed = record("nikto", "10.0.0.1", false);
    let text = target_results("10.0.0", &[&ok, &failed]);

    assert!(text.contains("Found 2 scan(s)"));
    assert!(text.contains("1. [ok] NMAP"));
    assert!(text.contains("2. [FAILED] NIKTO"));
    assert!(text.contains("Output: line one line two..."));
    assert!(text.contains("Error: HTTP error: 500"));
}

#[test]
fn scan_details_for_open_record() {
    let start = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    let mut params = serde_json::Map::new();
    params.insert("target".into(), "10.0.0.1".into());
    params.insert("rate".into(), 1000.into());
    let mut record = ScanRecord::started(
        scan_id("masscan_20260101_120000_127_0_0_1"),
        "masscan",
        params,
        "127.0.0.1",
        start,
    );
    let text = scan_details(&record);
    assert!(text.contains("Status: started"));
    assert!(text.contains("never recorded"));
    assert!(text.contains("   target: 10.0.0.1"));
    assert!(text.contains("   rate: 1000"));
    assert!(!text.contains("RESULTS"));

    record.complete(&ExecOutcome::exited(0, "ok".into(), String::new()), start);
    let text = scan_details(&record);
    assert_eq!(record.status, ScanStatus::Completed);
    assert!(text.contains("Success: Yes"));
    assert!(text.contains("Output Length: 2 characters"));
}
