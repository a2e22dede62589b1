// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sr-exec: runs one external process with concurrent output capture,
//! a deadline, and escalating termination.

mod capture;
mod command;
mod error;
mod runner;
mod terminate;

pub use capture::CaptureLimit;
pub use command::CommandLine;
pub use error::ExecError;
pub use runner::{ProcessRunner, GRACE_PERIOD};
pub use terminate::Termination;
