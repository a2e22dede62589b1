// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan ledger: one JSON record per scan id.
//!
//! A record is created with status `started` before the process is spawned
//! and rewritten exactly once when the invocation ends. A crash in between
//! leaves the `started` record behind, which is how interrupted scans are
//! discovered on the next startup.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use sr_core::{Clock, ExecOutcome, ScanId, ScanIdGen, ScanRecord, ScanStatus, SystemClock};

use crate::error::LedgerError;
use crate::fs::{scan_json_dir, write_atomic, write_new};

/// Ids tried by `begin` before giving up on a crowded second.
const MAX_BEGIN_ATTEMPTS: u32 = 64;

/// Selection for [`ScanLedger::list_filtered`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanFilter {
    pub tool: Option<String>,
    pub status: Option<ScanStatus>,
    pub limit: Option<usize>,
}

impl ScanFilter {
    fn matches(&self, record: &ScanRecord) -> bool {
        self.tool.as_deref().map_or(true, |tool| record.tool == tool)
            && self.status.map_or(true, |status| record.status == status)
    }
}

#[derive(Debug)]
pub struct ScanLedger<C: Clock = SystemClock> {
    dir: PathBuf,
    clock: C,
    ids: ScanIdGen<C>,
}

impl ScanLedger<SystemClock> {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        Self::with_clock(dir, SystemClock)
    }
}

impl<C: Clock> ScanLedger<C> {
    pub fn with_clock(dir: impl Into<PathBuf>, clock: C) -> Result<Self, LedgerError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| LedgerError::Io { path: dir.clone(), source })?;
        Ok(Self { dir, ids: ScanIdGen::new(clock.clone()), clock })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, id: &ScanId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Persist a `started` record and return its id.
    ///
    /// Uses create-new semantics, so an id left on disk by a previous daemon
    /// run within the same second is skipped rather than overwritten.
    pub fn begin(
        &self,
        tool: &str,
        parameters: Map<String, Value>,
        caller: &str,
    ) -> Result<ScanId, LedgerError> {
        for _ in 0..MAX_BEGIN_ATTEMPTS {
            let id = self.ids.next(tool, caller);
            let record = ScanRecord::started(
                id.clone(),
                tool,
                parameters.clone(),
                caller,
                self.clock.utc_now(),
            );
            let json = serde_json::to_vec_pretty(&record)?;
            let path = self.path(&id);
            match write_new(&path, &json) {
                Ok(()) => {
                    tracing::info!(scan_id = %id, tool, caller, "scan started");
                    return Ok(id);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    tracing::debug!(scan_id = %id, "scan id already on disk, trying next");
                }
                Err(source) => return Err(LedgerError::Io { path, source }),
            }
        }
        Err(LedgerError::IdExhausted { tool: tool.to_string(), attempts: MAX_BEGIN_ATTEMPTS })
    }

    /// Close a record with the invocation outcome.
    ///
    /// Last write wins when called twice. A missing record is logged and
    /// ignored.
    pub fn complete(&self, id: &ScanId, outcome: &ExecOutcome) -> Result<(), LedgerError> {
        self.update(id, |record, now| record.complete(outcome, now))
    }

    /// Close a record that has no process outcome (command could not be
    /// built, or the execution task died).
    pub fn fail(&self, id: &ScanId, error: &str) -> Result<(), LedgerError> {
        self.update(id, |record, now| record.fail(error, now))
    }

    fn update<F>(&self, id: &ScanId, apply: F) -> Result<(), LedgerError>
    where
        F: FnOnce(&mut ScanRecord, chrono::DateTime<chrono::Utc>),
    {
        let Some(mut record) = self.get(id)? else {
            tracing::warn!(scan_id = %id, "scan record missing, outcome not recorded");
            return Ok(());
        };
        apply(&mut record, self.clock.utc_now());
        let json = serde_json::to_vec_pretty(&record)?;
        let path = self.path(id);
        write_atomic(&path, &json).map_err(|source| LedgerError::Io { path, source })?;
        tracing::info!(scan_id = %id, status = %record.status, "scan finished");
        Ok(())
    }

    pub fn get(&self, id: &ScanId) -> Result<Option<ScanRecord>, LedgerError> {
        let path = self.path(id);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(LedgerError::Io { path, source }),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| LedgerError::Corrupt { path, source })
    }

    /// Most recent records first.
    pub fn list(&self, limit: usize) -> Vec<ScanRecord> {
        self.list_filtered(&ScanFilter { limit: Some(limit), ..ScanFilter::default() })
    }

    /// Records matching `filter`, most recent first (ties by id, descending).
    /// Unreadable records are skipped.
    pub fn list_filtered(&self, filter: &ScanFilter) -> Vec<ScanRecord> {
        let mut records: Vec<ScanRecord> = scan_json_dir(&self.dir, "scan record", |_| true)
            .into_iter()
            .map(|(_, record)| record)
            .filter(|record| filter.matches(record))
            .collect();
        records.sort_by(|a, b| {
            b.start_time.cmp(&a.start_time).then_with(|| b.scan_id.cmp(&a.scan_id))
        });
        if let Some(limit) = filter.limit {
            records.truncate(limit);
        }
        records
    }

    /// Records that were started and never closed.
    pub fn open_scans(&self) -> Vec<ScanRecord> {
        self.list_filtered(&ScanFilter { status: Some(ScanStatus::Started), ..ScanFilter::default() })
            .into_iter()
            .filter(ScanRecord::is_open)
            .collect()
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
