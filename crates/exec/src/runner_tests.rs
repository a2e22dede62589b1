// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sr_core::OutcomeKind;

fn runner() -> ProcessRunner {
    ProcessRunner::new().grace_period(Duration::from_millis(500))
}

fn sh(script: &str) -> CommandLine {
    CommandLine::argv("sh", ["-c", script])
}

// ---------------------------------------------------------------------------
// Normal exit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn zero_exit_is_success() {
    let outcome = runner().run(&CommandLine::argv("echo", ["hello"]), Duration::from_secs(10)).await;
    assert!(outcome.success);
    assert!(!outcome.timed_out);
    assert!(!outcome.partial_results);
    assert_eq!(outcome.return_code, 0);
    assert_eq!(outcome.stdout, "hello\n");
    assert_eq!(outcome.outcome, OutcomeKind::Succeeded);
}

#[yare::parameterized(
    false_cmd = { "false", 1 },
    exit_3    = { "exit 3", 3 },
)]
fn nonzero_exit_is_failure(script: &str, code: i32) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let outcome = rt.block_on(runner().run(&sh(script), Duration::from_secs(10)));
    assert!(!outcome.success);
    assert!(!outcome.timed_out);
    assert_eq!(outcome.return_code, code);
    assert_eq!(outcome.outcome, OutcomeKind::Failed);
}

#[tokio::test]
async fn streams_are_captured_separately() {
    let outcome = runner().run(&sh("echo out; echo err >&2"), Duration::from_secs(10)).await;
    assert_eq!(outcome.stdout, "out\n");
    assert_eq!(outcome.stderr, "err\n");
}

#[tokio::test]
async fn large_output_does_not_block_on_full_pipe() {
    let outcome = runner().run(&CommandLine::argv("seq", ["1", "200000"]), Duration::from_secs(30)).await;
    assert!(outcome.success);
    assert!(!outcome.timed_out);
    assert_eq!(outcome.stdout.lines().count(), 200_000);
    assert_eq!(outcome.stdout.lines().last(), Some("200000"));
}

#[tokio::test]
async fn bounded_capture_keeps_tail() {
    let outcome = runner()
        .capture(CaptureLimit::Bytes(100))
        .run(&CommandLine::argv("seq", ["1", "1000"]), Duration::from_secs(10))
        .await;
    assert!(outcome.stdout.starts_with("[... "));
    assert!(outcome.stdout.ends_with("999\n1000\n"));
}

#[tokio::test]
async fn shell_command_line_runs_through_sh() {
    let outcome = runner().run(&CommandLine::shell("echo a && echo b"), Duration::from_secs(10)).await;
    assert!(outcome.success);
    assert_eq!(outcome.stdout, "a\nb\n");
}

#[tokio::test]
async fn argv_is_not_interpreted_by_a_shell() {
    let outcome =
        runner().run(&CommandLine::argv("echo", ["$(id)", ";", "rm"]), Duration::from_secs(10)).await;
    assert_eq!(outcome.stdout, "$(id) ; rm\n");
}

#[tokio::test]
async fn background_grandchild_holding_pipe_does_not_hang() {
    let started = Instant::now();
    let outcome = runner().run(&sh("sleep 30 & echo done"), Duration::from_secs(1)).await;
    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(outcome.success);
    assert!(!outcome.timed_out);
    assert_eq!(outcome.stdout, "done\n");
}

// ---------------------------------------------------------------------------
// Timeouts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn timeout_with_output_is_partial_success() {
    let outcome = runner().run(&sh("echo start; sleep 3; echo end"), Duration::from_secs(1)).await;
    assert!(outcome.success);
    assert!(outcome.timed_out);
    assert!(outcome.partial_results);
    assert_eq!(outcome.return_code, -1);
    assert_eq!(outcome.stdout, "start\n");
    assert_eq!(outcome.outcome, OutcomeKind::TimedOutWithPartialResults);
}

#[tokio::test]
async fn timeout_with_only_stderr_is_partial_success() {
    let outcome = runner().run(&sh("echo warn >&2; sleep 3"), Duration::from_millis(500)).await;
    assert!(outcome.success);
    assert!(outcome.partial_results);
    assert_eq!(outcome.stderr, "warn\n");
}

#[tokio::test]
async fn silent_timeout_is_failure() {
    let outcome = runner().run(&CommandLine::argv("sleep", ["5"]), Duration::from_millis(300)).await;
    assert!(!outcome.success);
    assert!(outcome.timed_out);
    assert!(!outcome.partial_results);
    assert_eq!(outcome.return_code, -1);
    assert_eq!(outcome.outcome, OutcomeKind::TimedOutWithoutResults);
}

#[tokio::test]
async fn process_ignoring_sigterm_is_killed_after_grace() {
    let started = Instant::now();
    let outcome = runner()
        .run(&sh("trap '' TERM; echo stubborn; sleep 30"), Duration::from_millis(300))
        .await;
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(800), "grace period skipped: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(10));
    assert!(outcome.timed_out);
    assert_eq!(outcome.stdout, "stubborn\n");
}

#[tokio::test]
async fn group_members_ignoring_sigterm_die_with_the_leader() {
    let dir = tempfile::TempDir::new().unwrap();
    let marker = dir.path().join("survived");
    let script = format!("(trap '' TERM; sleep 2; touch '{}') & echo hi; sleep 30", marker.display());

    let outcome = runner().run(&sh(&script), Duration::from_millis(300)).await;
    assert!(outcome.timed_out);
    assert_eq!(outcome.stdout, "hi\n");

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(!marker.exists(), "background member outlived escalation");
}

#[tokio::test]
async fn terminated_leader_takes_its_group_along() {
    let dir = tempfile::TempDir::new().unwrap();
    let marker = dir.path().join("survived");
    let script = format!("(trap '' TERM; sleep 1; touch '{}') & sleep 30", marker.display());
    let mut child = sh(&script).to_command().spawn().unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(escalate(&mut child, Duration::from_millis(500)).await, Termination::Terminated);
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!marker.exists());
}

#[tokio::test]
async fn escalation_is_idempotent() {
    let mut child = sh("sleep 30").to_command().spawn().unwrap();
    let first = escalate(&mut child, Duration::from_millis(500)).await;
    let second = escalate(&mut child, Duration::from_millis(500)).await;
    assert_eq!(first, Termination::Terminated);
    assert_eq!(second, Termination::AlreadyExited);
}

#[test]
fn default_grace_period_is_five_seconds() {
    assert_eq!(GRACE_PERIOD, Duration::from_secs(5));
    assert_eq!(ProcessRunner::new().grace_period, GRACE_PERIOD);
}

// ---------------------------------------------------------------------------
// Launch failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_binary_is_launch_failure() {
    let outcome = runner()
        .run(&CommandLine::argv("sr-definitely-not-installed", ["x"]), Duration::from_secs(5))
        .await;
    assert!(!outcome.success);
    assert!(!outcome.timed_out);
    assert_eq!(outcome.return_code, -1);
    assert!(outcome.stderr.starts_with("Error executing command: "), "{}", outcome.stderr);
    assert!(outcome.stderr.contains("No such file or directory"));
    assert_eq!(outcome.outcome, OutcomeKind::LaunchFailed);
}
