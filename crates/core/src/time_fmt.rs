// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timestamp and duration formatting shared by ids, file names and reports.

use chrono::{DateTime, Utc};

/// `YYYYmmdd_HHMMSS`, used in scan ids.
pub fn second_stamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

/// `YYYYmmdd_HHMMSS_ffffff`, used in result file names.
pub fn micro_stamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d_%H%M%S_%6f").to_string()
}

/// Format a millisecond duration as a short human string (`850ms`, `12.4s`, `3m05s`).
pub fn format_elapsed_ms(ms: u64) -> String {
    if ms < 1_000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1_000.0)
    } else if ms < 3_600_000 {
        let secs = ms / 1_000;
        format!("{}m{:02}s", secs / 60, secs % 60)
    } else {
        let mins = ms / 60_000;
        format!("{}h{:02}m", mins / 60, mins % 60)
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
