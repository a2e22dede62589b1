// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sr-core: shared types for the scan relay daemon and client

pub mod macros;

pub mod clock;
pub mod id;
pub mod outcome;
pub mod scan;
pub mod text;
pub mod time_fmt;
pub mod wire;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use id::{is_safe_file_component, slug, InvalidScanId, ScanId, ScanIdGen};
pub use outcome::{ExecOutcome, OutcomeKind, FAILED_RETURN_CODE};
pub use scan::{ParseStatusError, ScanRecord, ScanStatus, ScanSummary};
pub use text::truncate_chars;
pub use time_fmt::{format_elapsed_ms, micro_stamp, second_stamp};
pub use wire::{ResultOutcome, ToolResponse};
