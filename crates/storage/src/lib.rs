// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sr-storage: durable scan ledger and client-side result corpus.
//!
//! Both stores are plain directories of pretty-printed JSON files, one file
//! per record, so they can be inspected and cleaned up with ordinary tools.

mod analysis;
mod error;
mod fs;
mod ledger;
mod results;

pub use analysis::{
    analyze, records_for_target, AggregateReport, FailedScan, TargetCount, ToolStats,
    FAILED_SCANS_LIMIT, STDERR_PREVIEW_CHARS, TOP_TARGETS_LIMIT,
};
pub use error::{LedgerError, StoreError};
pub use ledger::{ScanFilter, ScanLedger};
pub use results::{sanitize_target, ResultRecord, ResultStore, DEFAULT_SUMMARY_FILE};
