// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared handler state.

use std::sync::Arc;

use sr_exec::ProcessRunner;
use sr_storage::ScanLedger;

use crate::config::Config;
use crate::endpoint::ExecutionEndpoint;

#[derive(Debug, Clone)]
pub struct AppState {
    pub endpoint: ExecutionEndpoint,
    /// `None` disables authentication.
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(config: &Config, ledger: Arc<ScanLedger>) -> Self {
        Self {
            endpoint: ExecutionEndpoint::new(
                ledger,
                ProcessRunner::new(),
                config.work_dir.clone(),
                config.timeout,
            ),
            api_key: config.api_key.as_deref().map(Arc::from),
        }
    }

    pub fn ledger(&self) -> &ScanLedger {
        self.endpoint.ledger()
    }
}
