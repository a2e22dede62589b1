// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sr scan` and `sr command`: run something on the daemon and keep the result.

use anyhow::Result;
use clap::Args;
use serde_json::{json, Value};
use sr_core::ResultOutcome;

use super::Context;
use crate::exit_error::ExitError;
use crate::format::Report;
use crate::output::OutputFormat;
use crate::tools::{self, Formatter};

/// Endpoint of the shell passthrough.
const COMMAND_ENDPOINT: &str = "api/command";

#[derive(Args)]
pub struct ScanArgs {
    /// Tool name (see `sr tools`)
    pub tool: String,
    /// Tool parameters; object parameters take `name.KEY=VALUE`
    #[arg(value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

#[derive(Args)]
pub struct CommandArgs {
    /// Shell command run with `sh -c` on the daemon host
    pub script: String,
}

pub async fn scan(args: ScanArgs, ctx: &Context) -> Result<()> {
    let tool = tools::lookup(&args.tool).ok_or_else(|| {
        ExitError::usage(format!("unknown tool `{}` (run `sr tools` for the list)", args.tool))
    })?;
    let payload = tool.payload(&args.params).map_err(|e| ExitError::usage(e.to_string()))?;
    let target = tool.target(&payload);

    tracing::info!(tool = tool.name, %target, "sending scan");
    let outcome = ctx.client.send(tool.endpoint, &Value::Object(payload)).await;
    finish(ctx, tool.name, &target, tool.formatter, &outcome)
}

pub async fn command(args: CommandArgs, ctx: &Context) -> Result<()> {
    if args.script.trim().is_empty() {
        return Err(ExitError::usage("Command parameter is required").into());
    }
    let outcome = ctx.client.send(COMMAND_ENDPOINT, &json!({ "command": args.script })).await;
    finish(ctx, "command", &args.script, Formatter::Report { title: "Command" }, &outcome)
}

/// Persist, print, then turn a failed outcome into exit status 1.
fn finish(
    ctx: &Context,
    tool: &str,
    target: &str,
    formatter: Formatter,
    outcome: &ResultOutcome,
) -> Result<()> {
    let saved = match ctx.store.persist(tool, target, outcome) {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!(tool, error = %e, "could not save result");
            None
        }
    };

    match (ctx.format, formatter) {
        (OutputFormat::Text, Formatter::Report { title }) => {
            let report = Report::new(format!("{title}: {target}"), outcome).saved_to(saved.as_deref());
            print!("{report}");
        }
        _ => {
            let mut doc = outcome.to_json();
            if let (Some(path), Value::Object(map)) = (&saved, &mut doc) {
                map.insert("saved_to".into(), Value::String(path.display().to_string()));
            }
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }

    if outcome.success() {
        return Ok(());
    }
    let reason = match outcome {
        ResultOutcome::Completed { body, .. } => body
            .error
            .clone()
            .unwrap_or_else(|| format!("return code {}", body.return_code.unwrap_or(-1))),
        other => other.error().unwrap_or_else(|| "unknown error".to_string()),
    };
    Err(ExitError::failure(format!("{tool} failed: {reason}")).into())
}
