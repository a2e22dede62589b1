// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What a tool builder produces, and how it is carried out.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;
use sr_core::ExecOutcome;
use sr_exec::{CommandLine, ProcessRunner};

use super::output::OutputParser;

/// Everything needed to run one templated invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub command: CommandLine,
    /// Files written before the process starts (path, contents).
    pub inputs: Vec<(PathBuf, String)>,
    /// File the tool writes and the endpoint parses afterwards.
    pub output: Option<OutputParser>,
}

impl Plan {
    pub fn argv(program: &str, args: Vec<String>) -> Self {
        Self { command: CommandLine::argv(program, args), inputs: Vec::new(), output: None }
    }

    sr_core::setters! {
        set { output: Option<OutputParser> }
    }

    pub fn with_input(mut self, path: PathBuf, contents: String) -> Self {
        self.inputs.push((path, contents));
        self
    }
}

/// Per-invocation file names in the work directory.
///
/// Every path handed out shares one random token, so concurrent scans of
/// the same tool never collide. All of them are removed after the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    dir: PathBuf,
    token: String,
    paths: Vec<PathBuf>,
}

impl Artifacts {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), token: nanoid::nanoid!(12), paths: Vec::new() }
    }

    /// Reserve `{stem}_{token}.{ext}`.
    pub fn path(&mut self, stem: &str, ext: &str) -> PathBuf {
        let path = self.dir.join(format!("{stem}_{}.{ext}", self.token));
        self.paths.push(path.clone());
        path
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Best-effort removal of every reserved path.
    pub fn remove_all(&self) {
        for path in &self.paths {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to remove scan artifact");
                }
            }
        }
    }
}

/// A plan bound to its artifacts, ready for the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    pub plan: Plan,
    pub artifacts: Artifacts,
}

/// Process outcome plus whatever the output parser extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct Executed {
    pub outcome: ExecOutcome,
    pub parsed_output: Option<Value>,
}

impl Prepared {
    /// The shell passthrough: no inputs, no outputs.
    pub fn shell(script: impl Into<String>, work_dir: &Path) -> Self {
        Self {
            plan: Plan {
                command: CommandLine::shell(script),
                inputs: Vec::new(),
                output: None,
            },
            artifacts: Artifacts::new(work_dir),
        }
    }

    /// Write inputs, run, parse output, then remove every artifact.
    ///
    /// Returns an error only when an input file cannot be written; process
    /// failures are part of the outcome.
    pub async fn execute(self, runner: &ProcessRunner, timeout: Duration) -> std::io::Result<Executed> {
        let result = self.execute_inner(runner, timeout).await;
        self.artifacts.remove_all();
        result
    }

    async fn execute_inner(&self, runner: &ProcessRunner, timeout: Duration) -> std::io::Result<Executed> {
        for (path, contents) in &self.plan.inputs {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(path, contents).await?;
        }
        if let Some(parser) = &self.plan.output {
            if let Some(parent) = parser.path().parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let outcome = runner.run(&self.plan.command, timeout).await;
        // Partial results after a timeout count as success and are parsed too.
        let parsed_output = match &self.plan.output {
            Some(parser) if outcome.success => parser.parse(),
            _ => None,
        };
        Ok(Executed { outcome, parsed_output })
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
