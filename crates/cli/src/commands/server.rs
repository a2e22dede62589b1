// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon queries: health, scan history and scan details.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sr_core::{format_elapsed_ms, ScanRecord, ScanStatus};

use super::Context;
use crate::client::ClientError;
use crate::color;
use crate::exit_error::ExitError;
use crate::format;
use crate::output::{format_or_json, format_time_ago, handle_list, OutputFormat};

#[derive(Args)]
pub struct HistoryArgs {
    /// Number of records to show
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,
    /// Only this tool
    #[arg(long)]
    pub tool: Option<String>,
    /// Only this status (started, completed, failed)
    #[arg(long)]
    pub status: Option<ScanStatus>,
}

#[derive(Args)]
pub struct ShowArgs {
    pub scan_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Health {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    tools_status: BTreeMap<String, bool>,
    #[serde(default)]
    all_essential_tools_available: bool,
    #[serde(default)]
    open_scans: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct HistoryPage {
    total: usize,
    scans: Vec<ScanRecord>,
}

fn unreachable(e: ClientError) -> anyhow::Error {
    ExitError::failure(e.to_string()).into()
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| ExitError::failure(format!("Invalid response body: {e}")).into())
}

pub async fn health(ctx: &Context) -> Result<()> {
    let value = ctx.client.get("health", &[]).await.map_err(unreachable)?;
    if ctx.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let health: Health = decode(value)?;
    println!("Server:  {}", ctx.client.base_url());
    println!("Status:  {}", health.status);
    if let Some(version) = &health.version {
        println!("Version: {version}");
    }
    if !health.message.is_empty() {
        println!("{}", color::muted(&health.message));
    }
    println!();
    for (tool, ok) in &health.tools_status {
        println!("  {:<16} {}", tool, color::available(*ok));
    }
    println!();
    println!("Essential tools available: {}", color::available(health.all_essential_tools_available));
    if health.open_scans > 0 {
        println!("Open scans: {} (running, or interrupted by a daemon restart)", health.open_scans);
    }
    Ok(())
}

pub async fn history(args: HistoryArgs, ctx: &Context) -> Result<()> {
    let limit = args.limit;
    let mut query = vec![("limit", limit.to_string())];
    if let Some(tool) = args.tool {
        query.push(("tool", tool));
    }
    if let Some(status) = args.status {
        query.push(("status", status.to_string()));
    }
    let page: HistoryPage =
        decode(ctx.client.get("api/scans/history", &query).await.map_err(unreachable)?)?;

    let now = Utc::now();
    handle_list(ctx.format, &page.scans, "No scan history found.", |scans, out| {
        writeln!(
            out,
            "{:<44} {:<14} {:<10} {:<8} {:<9} {}",
            "SCAN ID", "TOOL", "STATUS", "STARTED", "DURATION", "TARGET"
        )?;
        for scan in scans {
            let duration = scan
                .end_time
                .map(|end| format_elapsed_ms((end - scan.start_time).num_milliseconds().max(0) as u64))
                .unwrap_or_else(|| "-".to_string());
            // Pad before coloring so escape codes do not skew the columns.
            let status = format!("{:<10}", scan.status.to_string());
            let status = status.replacen(&scan.status.to_string(), &color::status(scan.status), 1);
            writeln!(
                out,
                "{:<44} {} {} {:<8} {:<9} {}",
                scan.scan_id.as_str(),
                color::header(&format!("{:<14}", scan.tool)),
                status,
                format_time_ago(scan.start_time, now),
                duration,
                scan.target_hint().unwrap_or("-"),
            )?;
        }
        if scans.len() == limit {
            writeln!(out, "\nShowing the {limit} most recent. Use -n N to see more.")?;
        }
        Ok(())
    })
}

pub async fn show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let endpoint = format!("api/scans/{}", args.scan_id);
    let record: ScanRecord = decode(ctx.client.get(&endpoint, &[]).await.map_err(unreachable)?)?;
    format_or_json(ctx.format, &record, || format::scan_details(&record))
}
