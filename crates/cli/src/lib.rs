// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sr-cli: client for the srd daemon.
//!
//! Sends tool invocations, keeps a local copy of every outcome and reports
//! over the collected results.

pub mod client;
pub mod color;
pub mod commands;
pub mod exit_error;
pub mod format;
pub mod output;
pub mod tools;

pub use client::{ClientError, ResultClient};
pub use exit_error::ExitError;
pub use output::OutputFormat;
