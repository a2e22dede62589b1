// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Types exchanged between the daemon and the client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::ScanId;
use crate::outcome::{ExecOutcome, OutcomeKind};

/// Body returned by the tool and command endpoints.
///
/// Every field except `success` defaults so that older or foreign servers
/// that only send the minimal shape still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_code: Option<i32>,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(default)]
    pub partial_results: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<OutcomeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_id: Option<ScanId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResponse {
    pub fn from_outcome(outcome: ExecOutcome, scan_id: Option<ScanId>) -> Self {
        Self {
            success: outcome.success,
            return_code: Some(outcome.return_code),
            stdout: outcome.stdout,
            stderr: outcome.stderr,
            timed_out: outcome.timed_out,
            partial_results: outcome.partial_results,
            outcome: Some(outcome.outcome),
            duration_ms: Some(outcome.duration_ms),
            scan_id,
            parsed_output: None,
            error: None,
        }
    }
}

/// Client-side classification of one request to the daemon.
///
/// Rate limiting and capacity rejection are expected conditions distinct
/// from generic errors so callers can choose how long to back off.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultOutcome {
    /// 2xx with a decodable body; `success` comes from the body.
    Completed { status: u16, body: ToolResponse },
    /// 429. `retry_after` is the raw `Retry-After` header when present.
    RateLimited { retry_after: Option<String> },
    /// 503.
    CapacityReached,
    /// Any other status, transport failure, or undecodable body.
    Error { message: String, status_code: Option<u16> },
}

impl ResultOutcome {
    pub fn success(&self) -> bool {
        matches!(self, Self::Completed { body, .. } if body.success)
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    pub fn is_capacity_reached(&self) -> bool {
        matches!(self, Self::CapacityReached)
    }

    pub fn retry_after(&self) -> Option<&str> {
        match self {
            Self::RateLimited { retry_after } => retry_after.as_deref(),
            _ => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Completed { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            Self::CapacityReached => Some(503),
            Self::Error { status_code, .. } => *status_code,
        }
    }

    /// Human-readable error, if the outcome carries one.
    pub fn error(&self) -> Option<String> {
        match self {
            Self::Completed { body, .. } => body.error.clone(),
            Self::RateLimited { .. } => {
                Some("Rate limit exceeded. Please wait before retrying.".to_string())
            }
            Self::CapacityReached => Some(
                "Maximum concurrent scans reached. Please wait for running scans to complete."
                    .to_string(),
            ),
            Self::Error { message, .. } => Some(message.clone()),
        }
    }

    pub fn response(&self) -> Option<&ToolResponse> {
        match self {
            Self::Completed { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Flattened JSON view: the body fields plus classification flags.
    pub fn to_json(&self) -> Value {
        let mut map = match self.response().map(serde_json::to_value) {
            Some(Ok(Value::Object(map))) => map,
            _ => serde_json::Map::new(),
        };
        map.insert("success".into(), Value::Bool(self.success()));
        if self.is_rate_limited() {
            map.insert("rate_limited".into(), Value::Bool(true));
            map.insert(
                "retry_after".into(),
                self.retry_after().map_or(Value::Null, |s| Value::String(s.to_string())),
            );
        }
        if self.is_capacity_reached() {
            map.insert("concurrent_limit_reached".into(), Value::Bool(true));
        }
        if let Some(error) = self.error() {
            map.insert("error".into(), Value::String(error));
        }
        if let Some(code) = self.status_code() {
            map.insert("status_code".into(), Value::from(code));
        }
        Value::Object(map)
    }
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
