// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan identities.
//!
//! A scan id is human-traceable: `{tool}_{YYYYmmdd_HHMMSS}_{caller}` with the
//! caller address flattened to `_`-separated words. Ids double as ledger file
//! names, so every id handed out is a safe single path component.

use std::collections::HashMap;

use parking_lot::Mutex;
use smol_str::SmolStr;

use crate::clock::Clock;
use crate::time_fmt::second_stamp;

/// Longest file name most filesystems accept, minus room for `.json.tmp`.
const MAX_ID_LEN: usize = 240;

/// Identity of one invocation, shared by its ledger record and its response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ScanId(SmolStr);

/// A string that cannot be used as a scan id (and therefore as a file name).
#[derive(Debug, thiserror::Error)]
#[error("invalid scan id `{0}`")]
pub struct InvalidScanId(pub String);

impl ScanId {
    /// Parse an id received from outside (URL path, CLI argument).
    pub fn parse(id: &str) -> Result<Self, InvalidScanId> {
        if is_safe_file_component(id) && id.len() <= MAX_ID_LEN {
            Ok(Self(SmolStr::new(id)))
        } else {
            Err(InvalidScanId(id.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ScanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ScanId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ScanId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ScanId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Returns true when `s` can be used verbatim as one file name.
pub fn is_safe_file_component(s: &str) -> bool {
    !s.is_empty()
        && s != "."
        && s != ".."
        && !s.starts_with('.')
        && !s.contains(['/', '\\', '\0'])
}

/// Flatten free text into `[A-Za-z0-9_-]`, mapping everything else to `_`.
pub fn slug(s: &str) -> String {
    let out: String = s
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if out.is_empty() {
        "unknown".to_string()
    } else {
        out
    }
}

/// Issues scan ids, appending `-2`, `-3`, … when the same tool and caller
/// ask for an id more than once within one second.
#[derive(Debug)]
pub struct ScanIdGen<C: Clock> {
    clock: C,
    issued: Mutex<Issued>,
}

#[derive(Debug, Default)]
struct Issued {
    stamp: String,
    counts: HashMap<String, u32>,
}

impl<C: Clock> ScanIdGen<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, issued: Mutex::new(Issued::default()) }
    }

    /// Next id for `tool` invoked by `caller`.
    ///
    /// Calling again with the same arguments in the same second always yields
    /// a different id, which is how the ledger recovers from a file collision.
    pub fn next(&self, tool: &str, caller: &str) -> ScanId {
        let stamp = second_stamp(self.clock.utc_now());
        let mut base = format!("{}_{}_{}", slug(tool), stamp, slug(caller));
        base.truncate(MAX_ID_LEN - 8);

        let mut issued = self.issued.lock();
        if issued.stamp != stamp {
            issued.stamp = stamp;
            issued.counts.clear();
        }
        let count = issued.counts.entry(base.clone()).or_insert(0);
        *count += 1;

        if *count == 1 {
            ScanId(SmolStr::new(base))
        } else {
            ScanId(SmolStr::new(format!("{base}-{count}")))
        }
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
