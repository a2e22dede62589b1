// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

use sr_storage::ResultStore;

use crate::client::ResultClient;
use crate::output::OutputFormat;

pub mod results;
pub mod scan;
pub mod server;
pub mod tools;

/// What every command handler gets.
pub struct Context {
    pub client: ResultClient,
    pub store: ResultStore,
    pub format: OutputFormat,
}
