// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! srd: security tool runner daemon.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sr_daemon::lifecycle::{self, StartupResult};
use sr_daemon::{logging, router, AppState, Config, Settings};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "srd", version, about = "Runs security tools on behalf of remote callers")]
struct Args {
    /// TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Shared secret required in X-API-Key
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Default per-invocation timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// State directory (ledger, work files, logs)
    #[arg(long, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Debug logging
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            bind: self.bind.clone(),
            port: self.port,
            api_key: self.api_key.clone(),
            timeout_secs: self.timeout,
            state_dir: self.state_dir.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref(), args.settings())?;

    std::fs::create_dir_all(&config.logs_dir)
        .with_context(|| format!("creating {}", config.logs_dir.display()))?;
    let _log_guard = logging::init(&config.logs_dir, args.debug);

    let StartupResult { daemon, listener, .. } = lifecycle::startup(&config).await?;
    let state = AppState::new(&daemon.config, daemon.ledger.clone());

    let shutdown = CancellationToken::new();
    lifecycle::spawn_signal_handler(shutdown.clone());

    info!(
        timeout_s = config.timeout.as_secs(),
        auth = config.api_key.is_some(),
        "Serving"
    );
    axum::serve(listener, router(state).into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("server error")?;

    daemon.shutdown();
    Ok(())
}
