// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binds one process invocation to one ledger record.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use sr_core::{ScanId, ToolResponse};
use sr_exec::ProcessRunner;
use sr_storage::ScanLedger;
use tracing::{error, warn};

use crate::error::ApiError;
use crate::tools::Prepared;

/// What the endpoint is asked to run.
#[derive(Debug)]
pub struct Invocation {
    pub tool: String,
    pub parameters: Map<String, Value>,
    pub caller: String,
    pub prepared: Prepared,
}

/// `begin` → run → `complete`, for every templated tool and the passthrough.
///
/// The whole sequence runs in its own task, so a client that disconnects
/// mid-scan does not abandon the ledger record. The process itself runs in
/// a nested task; if that task dies the record is still closed as failed.
#[derive(Debug, Clone)]
pub struct ExecutionEndpoint {
    ledger: Arc<ScanLedger>,
    runner: ProcessRunner,
    work_dir: PathBuf,
    timeout: Duration,
}

impl ExecutionEndpoint {
    pub fn new(ledger: Arc<ScanLedger>, runner: ProcessRunner, work_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self { ledger, runner, work_dir: work_dir.into(), timeout }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn ledger(&self) -> &Arc<ScanLedger> {
        &self.ledger
    }

    pub async fn execute(&self, invocation: Invocation) -> Result<ToolResponse, ApiError> {
        let this = self.clone();
        tokio::spawn(async move { this.supervise(invocation).await })
            .await
            .map_err(|e| {
                error!(error = %e, "scan supervisor task failed");
                ApiError::server(e)
            })?
    }

    async fn supervise(self, invocation: Invocation) -> Result<ToolResponse, ApiError> {
        let Invocation { tool, parameters, caller, prepared } = invocation;

        // A ledger that cannot be written must not stop the scan.
        let (tool_name, caller_addr) = (tool.clone(), caller.clone());
        let begun = self.on_ledger(move |ledger| Ok(ledger.begin(&tool_name, parameters, &caller_addr)?)).await;
        let scan_id = match begun {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(tool = %tool, caller = %caller, error = %e, "failed to record scan start");
                None
            }
        };

        let runner = self.runner.clone();
        let timeout = self.timeout;
        let task = tokio::spawn(async move { prepared.execute(&runner, timeout).await });

        match task.await {
            Ok(Ok(executed)) => {
                if let Some(id) = &scan_id {
                    let (target, outcome) = (id.clone(), executed.outcome.clone());
                    let closed = self.on_ledger(move |ledger| Ok(ledger.complete(&target, &outcome)?)).await;
                    if let Err(e) = closed {
                        warn!(scan_id = %id, error = %e, "failed to record scan outcome");
                    }
                }
                let mut response = ToolResponse::from_outcome(executed.outcome, scan_id);
                response.parsed_output = executed.parsed_output;
                Ok(response)
            }
            Ok(Err(e)) => {
                self.fail(scan_id.as_ref(), format!("failed to prepare command: {e}")).await;
                Err(ApiError::server(e))
            }
            Err(e) => {
                error!(tool = %tool, error = %e, "execution task failed");
                self.fail(scan_id.as_ref(), format!("execution task failed: {e}")).await;
                Err(ApiError::server(e))
            }
        }
    }

    async fn fail(&self, scan_id: Option<&ScanId>, reason: String) {
        let Some(id) = scan_id.cloned() else { return };
        let target = id.clone();
        if let Err(e) = self.on_ledger(move |ledger| Ok(ledger.fail(&target, &reason)?)).await {
            warn!(scan_id = %id, error = %e, "failed to record scan failure");
        }
    }

    /// Ledger writes hit the disk synchronously; keep them off the workers
    /// that drive other in-flight scans.
    async fn on_ledger<T, F>(&self, op: F) -> anyhow::Result<T>
    where
        F: FnOnce(&ScanLedger) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let ledger = Arc::clone(&self.ledger);
        tokio::task::spawn_blocking(move || op(&ledger)).await?
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;
