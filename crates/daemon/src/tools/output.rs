// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsers for tools that write structured output files.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

/// How to turn a tool's output file into `parsed_output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputParser {
    /// One JSON document per line (feroxbuster `--json`).
    JsonLines { path: PathBuf, max_results: usize },
    /// A single document with a `results` array (ffuf `-of json`).
    JsonResults { path: PathBuf, max_results: usize },
}

impl OutputParser {
    pub fn path(&self) -> &Path {
        match self {
            Self::JsonLines { path, .. } | Self::JsonResults { path, .. } => path,
        }
    }

    /// Parse the output file. `None` when it is missing or unusable.
    pub fn parse(&self) -> Option<Value> {
        let path = self.path();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read tool output");
                return None;
            }
        };
        match self {
            Self::JsonLines { max_results, .. } => Some(parse_json_lines(&content, *max_results)),
            Self::JsonResults { max_results, .. } => match parse_json_results(&content, *max_results) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "could not parse tool output");
                    None
                }
            },
        }
    }
}

/// `{results, truncated, total_parsed}` from the first `max_results` lines.
/// Lines that are not JSON are skipped but still count toward the cap.
pub fn parse_json_lines(content: &str, max_results: usize) -> Value {
    let mut results = Vec::new();
    let mut truncated = false;
    for (n, line) in content.lines().enumerate() {
        if n >= max_results {
            truncated = true;
            break;
        }
        if let Ok(value) = serde_json::from_str::<Value>(line.trim()) {
            results.push(value);
        }
    }
    let total_parsed = results.len();
    json!({ "results": results, "truncated": truncated, "total_parsed": total_parsed })
}

/// The whole document, with `results` capped at `max_results`. A capped
/// document gains `truncated: true` and `total_found` (the uncapped count).
pub fn parse_json_results(content: &str, max_results: usize) -> serde_json::Result<Value> {
    let mut doc: Value = serde_json::from_str(content)?;
    if let Some(map) = doc.as_object_mut() {
        let total = match map.get_mut("results") {
            Some(Value::Array(results)) if results.len() > max_results => {
                let total = results.len();
                results.truncate(max_results);
                Some(total)
            }
            _ => None,
        };
        if let Some(total) = total {
            map.insert("truncated".into(), Value::Bool(true));
            map.insert("total_found".into(), Value::from(total));
        }
    }
    Ok(doc)
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
