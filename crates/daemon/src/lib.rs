// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Security tool runner daemon library
//!
//! HTTP routes, tool templates, and the execution endpoint that ties each
//! process run to a scan ledger record. The `srd` binary wires these to a
//! listener.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod auth;
pub mod config;
pub mod endpoint;
pub mod env;
pub mod error;
pub mod extract;
pub mod lifecycle;
pub mod logging;
pub mod routes;
pub mod state;
pub mod tools;

pub use config::{Config, ConfigError, Settings};
pub use endpoint::{ExecutionEndpoint, Invocation};
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
