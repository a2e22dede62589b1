// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! sr: run security tools through an srd daemon and keep every result.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sr_cli::client::{ResultClient, DEFAULT_SERVER};
use sr_cli::commands::{self, results, scan, server, Context};
use sr_cli::{color, ExitError, OutputFormat};
use sr_storage::ResultStore;
use tracing_subscriber::EnvFilter;

/// Request timeout; long scans hold the connection open until they finish.
const DEFAULT_TIMEOUT_SECS: u64 = 1800;

#[derive(Parser)]
#[command(name = "sr", version, about = "Run security tools through an srd daemon", styles = color::styles())]
struct Cli {
    /// Daemon URL; `http://` is added when no scheme is given
    #[arg(long, global = true, env = "SR_SERVER", default_value = DEFAULT_SERVER)]
    server: String,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Shared secret sent as X-API-Key
    #[arg(long, global = true, env = "SR_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Where result files are written and read
    #[arg(long, global = true, env = "SR_RESULTS_DIR", value_name = "DIR")]
    results_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t)]
    output: OutputFormat,

    /// Verbose logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a tool on the daemon and save the result
    Scan(scan::ScanArgs),
    /// Run a shell command on the daemon host and save the result
    Command(scan::CommandArgs),
    /// Show daemon health and tool availability
    Health,
    /// List recent scans recorded by the daemon
    History(server::HistoryArgs),
    /// Show one scan recorded by the daemon
    Show(server::ShowArgs),
    /// Statistics over all saved results
    Analyze,
    /// Saved results whose target matches
    Target(results::TargetArgs),
    /// Write the analysis to a JSON file in the results directory
    Export(results::ExportArgs),
    /// List the tools this client knows about
    Tools,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug,hyper_util=info,reqwest=info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn default_results_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("sr").join("results"))
        .unwrap_or_else(|| PathBuf::from("results"))
}

async fn run(cli: Cli) -> Result<()> {
    let client = ResultClient::new(&cli.server, Duration::from_secs(cli.timeout), cli.api_key)?;
    let store = ResultStore::new(cli.results_dir.unwrap_or_else(default_results_dir));
    let ctx = Context { client, store, format: cli.output };

    match cli.command {
        Command::Scan(args) => scan::scan(args, &ctx).await,
        Command::Command(args) => scan::command(args, &ctx).await,
        Command::Health => server::health(&ctx).await,
        Command::History(args) => server::history(args, &ctx).await,
        Command::Show(args) => server::show(args, &ctx).await,
        Command::Analyze => results::analyze_corpus(&ctx),
        Command::Target(args) => results::target(args, &ctx),
        Command::Export(args) => results::export(args, &ctx),
        Command::Tools => commands::tools::list(&ctx),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(ExitError::code_of(&e));
    }
}
