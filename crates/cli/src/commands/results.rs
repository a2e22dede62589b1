// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queries over the local result corpus. None of these contact the daemon.

use anyhow::Result;
use clap::Args;
use sr_storage::{analyze, records_for_target, DEFAULT_SUMMARY_FILE};

use super::Context;
use crate::exit_error::ExitError;
use crate::format;
use crate::output::{format_or_json, OutputFormat};

#[derive(Args)]
pub struct TargetArgs {
    /// Case-insensitive substring of the target
    pub needle: String,
}

#[derive(Args)]
pub struct ExportArgs {
    /// File name inside the results directory
    #[arg(long, default_value = DEFAULT_SUMMARY_FILE)]
    pub file: String,
}

pub fn analyze_corpus(ctx: &Context) -> Result<()> {
    let records = ctx.store.load_all();
    if records.is_empty() && ctx.format == OutputFormat::Text {
        println!("No scan results found in {}", ctx.store.dir().display());
        return Ok(());
    }
    let report = analyze(&records);
    format_or_json(ctx.format, &report, || format::analysis(&report))
}

pub fn target(args: TargetArgs, ctx: &Context) -> Result<()> {
    let records = ctx.store.load_all();
    let matches = records_for_target(&records, &args.needle);
    if matches.is_empty() && ctx.format == OutputFormat::Text {
        println!("No scan results found for target: {}", args.needle);
        return Ok(());
    }
    format_or_json(ctx.format, &matches, || format::target_results(&args.needle, &matches))
}

pub fn export(args: ExportArgs, ctx: &Context) -> Result<()> {
    let report = analyze(&ctx.store.load_all());
    let path = ctx
        .store
        .export_summary(&report, &args.file)
        .map_err(|e| ExitError::failure(format!("Error exporting summary: {e}")))?;
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "path": path, "total": report.total })),
        OutputFormat::Text => println!("Summary exported to: {}", path.display()),
    }
    Ok(())
}
