// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What to run.

use std::fmt;
use std::process::Stdio;

/// A fully resolved command.
///
/// Templated tools always use [`CommandLine::Argv`]. [`CommandLine::Shell`]
/// exists for the passthrough endpoint only and hands the script to `sh -c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    Argv { program: String, args: Vec<String> },
    Shell(String),
}

impl CommandLine {
    pub fn argv<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Argv { program: program.into(), args: args.into_iter().map(Into::into).collect() }
    }

    pub fn shell(script: impl Into<String>) -> Self {
        Self::Shell(script.into())
    }

    /// Executable name, for logs and errors.
    pub fn program(&self) -> &str {
        match self {
            Self::Argv { program, .. } => program,
            Self::Shell(_) => "sh",
        }
    }

    pub(crate) fn to_command(&self) -> tokio::process::Command {
        let mut cmd = match self {
            Self::Argv { program, args } => {
                let mut cmd = tokio::process::Command::new(program);
                cmd.args(args);
                cmd
            }
            Self::Shell(script) => {
                let mut cmd = tokio::process::Command::new("sh");
                cmd.arg("-c").arg(script);
                cmd
            }
        };
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .process_group(0)
            .kill_on_drop(true);
        cmd
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argv { program, args } => {
                f.write_str(program)?;
                for arg in args {
                    if arg.is_empty() || arg.contains(char::is_whitespace) {
                        write!(f, " {arg:?}")?;
                    } else {
                        write!(f, " {arg}")?;
                    }
                }
                Ok(())
            }
            Self::Shell(script) => write!(f, "sh -c {script:?}"),
        }
    }
}
