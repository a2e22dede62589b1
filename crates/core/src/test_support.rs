// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{ExecOutcome, ScanId};

// ── Proptest strategies ─────────────────────────────────────────────────

pub mod strategies {
    use crate::ExecOutcome;
    use proptest::prelude::*;

    /// Any outcome the runner could produce.
    pub fn arb_outcome() -> impl Strategy<Value = ExecOutcome> {
        prop_oneof![
            (any::<i32>(), ".{0,40}", ".{0,40}")
                .prop_map(|(code, out, err)| ExecOutcome::exited(code, out, err)),
            (".{0,40}", ".{0,40}").prop_map(|(out, err)| ExecOutcome::timed_out(out, err)),
            ".{1,40}".prop_map(|e| ExecOutcome::launch_failed(e, String::new(), "")),
        ]
    }

    /// Targets as users type them: hosts, URLs, CIDRs.
    pub fn arb_target() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z]{1,10}\\.(com|org|local)",
            "https?://[a-z]{1,10}\\.com(/[a-z?=&]{0,10})?",
            "10\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}(/24)?",
        ]
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────

#[allow(clippy::panic)]
pub fn scan_id(raw: &str) -> ScanId {
    ScanId::parse(raw).unwrap_or_else(|e| panic!("{e}"))
}

pub fn ok_outcome(stdout: &str) -> ExecOutcome {
    ExecOutcome::exited(0, stdout.to_string(), String::new())
}

pub fn failed_outcome(code: i32, stderr: &str) -> ExecOutcome {
    ExecOutcome::exited(code, String::new(), stderr.to_string())
}
