// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;
use tempfile::TempDir;

const TIMEOUT: Duration = Duration::from_secs(10);

fn runner() -> ProcessRunner {
    ProcessRunner::new().grace_period(Duration::from_millis(200))
}

#[test]
fn artifacts_share_one_token() {
    let mut artifacts = Artifacts::new("/work");
    let a = artifacts.path("ffuf", "json");
    let b = artifacts.path("msf", "rc");
    let token = |p: &PathBuf| {
        let name = p.file_stem().unwrap().to_string_lossy().into_owned();
        name.split_once('_').unwrap().1.to_string()
    };
    assert_eq!(token(&a), token(&b));
    assert_eq!(artifacts.paths(), &[a, b]);
}

#[tokio::test]
async fn inputs_are_written_before_the_run_and_removed_after() {
    let dir = TempDir::new().unwrap();
    let mut artifacts = Artifacts::new(dir.path().join("work"));
    let script = artifacts.path("msf", "rc");
    let plan = Plan::argv("cat", vec![script.to_string_lossy().into_owned()])
        .with_input(script.clone(), "use x\nrun\n".into());

    let executed = Prepared { plan, artifacts }.execute(&runner(), TIMEOUT).await.unwrap();
    assert!(executed.outcome.success);
    assert_eq!(executed.outcome.stdout, "use x\nrun\n");
    assert!(!script.exists());
}

#[tokio::test]
async fn output_file_is_parsed_on_success() {
    let dir = TempDir::new().unwrap();
    let mut artifacts = Artifacts::new(dir.path());
    let out = artifacts.path("ferox", "json");
    let plan = Plan::argv(
        "sh",
        vec!["-c".into(), format!("printf '{{\"url\":\"/a\"}}\\n' > '{}'", out.display())],
    )
    .output(Some(OutputParser::JsonLines { path: out.clone(), max_results: 10 }));

    let executed = Prepared { plan, artifacts }.execute(&runner(), TIMEOUT).await.unwrap();
    let parsed = executed.parsed_output.unwrap();
    assert_eq!(parsed["results"][0]["url"], "/a");
    assert!(!out.exists());
}

#[tokio::test]
async fn output_is_not_parsed_after_failure() {
    let dir = TempDir::new().unwrap();
    let mut artifacts = Artifacts::new(dir.path());
    let out = artifacts.path("ferox", "json");
    let plan = Plan::argv(
        "sh",
        vec!["-c".into(), format!("echo '{{}}' > '{}'; exit 2", out.display())],
    )
    .output(Some(OutputParser::JsonLines { path: out.clone(), max_results: 10 }));

    let executed = Prepared { plan, artifacts }.execute(&runner(), TIMEOUT).await.unwrap();
    assert_eq!(executed.outcome.return_code, 2);
    assert_eq!(executed.parsed_output, None);
    assert!(!out.exists());
}

#[tokio::test]
async fn unwritable_work_dir_is_an_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("work");
    std::fs::write(&blocker, "not a directory").unwrap();
    let mut artifacts = Artifacts::new(&blocker);
    let script = artifacts.path("msf", "rc");
    let plan = Plan::argv("true", Vec::new()).with_input(script, "run\n".into());

    assert!(Prepared { plan, artifacts }.execute(&runner(), TIMEOUT).await.is_err());
}

#[tokio::test]
async fn shell_passthrough_has_no_artifacts() {
    let dir = TempDir::new().unwrap();
    let prepared = Prepared::shell("echo hi | tr a-z A-Z", dir.path());
    assert!(prepared.artifacts.paths().is_empty());
    let executed = prepared.execute(&runner(), TIMEOUT).await.unwrap();
    assert_eq!(executed.outcome.stdout, "HI\n");
}
