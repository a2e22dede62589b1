// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed access to a request's JSON parameters.

use serde_json::{Map, Value};
use thiserror::Error;

use super::args::split_args;

/// Parameter validation failures, reported to callers as HTTP 400.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("{0} parameter is required")]
    Missing(&'static str),

    #[error("{0} are required")]
    MissingGroup(&'static str),

    #[error("Invalid mode: {mode}. Must be one of: {}", allowed.join(", "))]
    InvalidMode { mode: String, allowed: &'static [&'static str] },

    #[error("Invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Borrowed view over the request body.
///
/// Absent and `null` keys take the default; a key that is present keeps its
/// value even when empty, except for [`Params::required`].
#[derive(Debug, Clone, Copy)]
pub struct Params<'a>(&'a Map<String, Value>);

impl<'a> Params<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self(map)
    }

    fn raw(&self, key: &str) -> Option<&'a Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Scalar value as text. Objects and arrays are rejected.
    pub fn text(&self, key: &'static str) -> Result<Option<String>, ToolError> {
        match self.raw(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(_) => Err(ToolError::Invalid { key, reason: "expected a string".into() }),
        }
    }

    pub fn text_or(&self, key: &'static str, default: &str) -> Result<String, ToolError> {
        Ok(self.text(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// Non-empty text, or `None` when absent or empty.
    pub fn optional(&self, key: &'static str) -> Result<Option<String>, ToolError> {
        Ok(self.text(key)?.filter(|s| !s.trim().is_empty()))
    }

    /// Non-empty text; `label` names the parameter in the error message.
    pub fn required(&self, key: &'static str, label: &'static str) -> Result<String, ToolError> {
        self.optional(key)?.ok_or(ToolError::Missing(label))
    }

    /// Non-negative integer given as a JSON number or numeric string.
    pub fn count_or(&self, key: &'static str, default: usize) -> Result<usize, ToolError> {
        match self.raw(key) {
            None => Ok(default),
            Some(Value::Number(n)) => n
                .as_u64()
                .map(|n| n as usize)
                .ok_or_else(|| ToolError::Invalid { key, reason: format!("{n} is not a count") }),
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map_err(|_| ToolError::Invalid { key, reason: format!("{s:?} is not a count") }),
            Some(_) => Err(ToolError::Invalid { key, reason: "expected a number".into() }),
        }
    }

    /// Free-form argument string split into argv words.
    pub fn words_or(&self, key: &'static str, default: &str) -> Result<Vec<String>, ToolError> {
        let raw = self.text_or(key, default)?;
        split_args(&raw).map_err(|e| ToolError::Invalid { key, reason: e.to_string() })
    }

    /// `additional_args` with an empty default.
    pub fn extra(&self) -> Result<Vec<String>, ToolError> {
        self.words_or("additional_args", "")
    }

    /// Value that must be one of `allowed`.
    pub fn mode(
        &self,
        key: &'static str,
        default: &str,
        allowed: &'static [&'static str],
    ) -> Result<String, ToolError> {
        let mode = self.text_or(key, default)?;
        if allowed.contains(&mode.as_str()) {
            Ok(mode)
        } else {
            Err(ToolError::InvalidMode { mode, allowed })
        }
    }

    pub fn object(&self, key: &'static str) -> Result<Option<&'a Map<String, Value>>, ToolError> {
        match self.raw(key) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(_) => Err(ToolError::Invalid { key, reason: "expected an object".into() }),
        }
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
