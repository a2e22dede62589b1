// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client-side tool registry.
//!
//! Each entry says where a tool is posted, which parameters it takes, how the
//! result file's target is derived and how the result is printed. Commands
//! read this table; nothing branches on tool names.

use serde_json::{Map, Value};
use thiserror::Error;

const DIRB_COMMON: &str = "/usr/share/wordlists/dirb/common.txt";
const ROCKYOU: &str = "/usr/share/wordlists/rockyou.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Sent as a JSON string.
    Text,
    /// Sent as a JSON number.
    Count,
    /// A JSON object assembled from `name.KEY=VALUE` arguments.
    Options,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: Option<&'static str>,
    pub required: bool,
}

const fn required(name: &'static str) -> ParamSpec {
    ParamSpec { name, kind: ParamKind::Text, default: None, required: true }
}

const fn text(name: &'static str) -> ParamSpec {
    ParamSpec { name, kind: ParamKind::Text, default: None, required: false }
}

const fn text_or(name: &'static str, default: &'static str) -> ParamSpec {
    ParamSpec { name, kind: ParamKind::Text, default: Some(default), required: false }
}

const fn count_or(name: &'static str, default: &'static str) -> ParamSpec {
    ParamSpec { name, kind: ParamKind::Count, default: Some(default), required: false }
}

const fn options(name: &'static str) -> ParamSpec {
    ParamSpec { name, kind: ParamKind::Options, default: None, required: false }
}

const EXTRA: ParamSpec = text("additional_args");

/// How the result store names what was scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKey {
    /// The value of one parameter.
    Param(&'static str),
    /// Two parameters joined with `_`.
    Joined(&'static str, &'static str),
    /// Last path component of a file parameter.
    Basename(&'static str),
    /// `options.RHOSTS`, else `options.RHOST`, else the module's last segment.
    ModuleHost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// Plain-text report headed `"{title}: {target}"`.
    Report { title: &'static str },
    /// The classified outcome as pretty JSON.
    Raw,
}

#[derive(Debug, Clone, Copy)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub endpoint: &'static str,
    pub params: &'static [ParamSpec],
    pub target: TargetKey,
    pub formatter: Formatter,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgError {
    #[error("expected key=value, got `{0}`")]
    Malformed(String),
    #[error("unknown parameter `{key}` for {tool} (expected one of: {expected})")]
    Unknown { tool: &'static str, key: String, expected: String },
    #[error("parameter `{key}` must be a non-negative number, got `{value}`")]
    NotACount { key: &'static str, value: String },
    #[error("missing required parameter `{key}` for {tool}")]
    Missing { tool: &'static str, key: &'static str },
}

static TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: "nmap",
        endpoint: "api/tools/nmap",
        params: &[required("target"), text_or("scan_type", "-sV"), text("ports"), EXTRA],
        target: TargetKey::Param("target"),
        formatter: Formatter::Report { title: "Nmap Scan" },
    },
    ToolDescriptor {
        name: "gobuster",
        endpoint: "api/tools/gobuster",
        params: &[required("url"), text_or("mode", "dir"), text_or("wordlist", DIRB_COMMON), EXTRA],
        target: TargetKey::Param("url"),
        formatter: Formatter::Raw,
    },
    ToolDescriptor {
        name: "feroxbuster",
        endpoint: "api/tools/feroxbuster",
        params: &[
            required("url"),
            text_or("wordlist", DIRB_COMMON),
            count_or("threads", "50"),
            count_or("max_results", "200"),
            EXTRA,
        ],
        target: TargetKey::Param("url"),
        formatter: Formatter::Raw,
    },
    ToolDescriptor {
        name: "nikto",
        endpoint: "api/tools/nikto",
        params: &[required("target"), EXTRA],
        target: TargetKey::Param("target"),
        formatter: Formatter::Raw,
    },
    ToolDescriptor {
        name: "sqlmap",
        endpoint: "api/tools/sqlmap",
        params: &[required("url"), text("data"), EXTRA],
        target: TargetKey::Param("url"),
        formatter: Formatter::Raw,
    },
    ToolDescriptor {
        name: "metasploit",
        endpoint: "api/tools/metasploit",
        params: &[required("module"), options("options")],
        target: TargetKey::ModuleHost,
        formatter: Formatter::Report { title: "Metasploit" },
    },
    ToolDescriptor {
        name: "hydra",
        endpoint: "api/tools/hydra",
        params: &[
            required("target"),
            required("service"),
            text("username"),
            text("username_file"),
            text("password"),
            text("password_file"),
            EXTRA,
        ],
        target: TargetKey::Joined("target", "service"),
        formatter: Formatter::Raw,
    },
    ToolDescriptor {
        name: "john",
        endpoint: "api/tools/john",
        params: &[required("hash_file"), text_or("wordlist", ROCKYOU), text("format"), EXTRA],
        target: TargetKey::Basename("hash_file"),
        formatter: Formatter::Raw,
    },
    ToolDescriptor {
        name: "wpscan",
        endpoint: "api/tools/wpscan",
        params: &[required("url"), EXTRA],
        target: TargetKey::Param("url"),
        formatter: Formatter::Raw,
    },
    ToolDescriptor {
        name: "enum4linux-ng",
        endpoint: "api/tools/enum4linux-ng",
        params: &[required("target"), text_or("additional_args", "-A")],
        target: TargetKey::Param("target"),
        formatter: Formatter::Raw,
    },
    ToolDescriptor {
        name: "ffuf",
        endpoint: "api/tools/ffuf",
        params: &[
            required("url"),
            text_or("wordlist", DIRB_COMMON),
            text_or("mode", "dir"),
            count_or("max_results", "100"),
            EXTRA,
        ],
        target: TargetKey::Param("url"),
        formatter: Formatter::Raw,
    },
    ToolDescriptor {
        name: "amass",
        endpoint: "api/tools/amass",
        params: &[required("domain"), text_or("mode", "enum"), EXTRA],
        target: TargetKey::Param("domain"),
        formatter: Formatter::Raw,
    },
    ToolDescriptor {
        name: "hashcat",
        endpoint: "api/tools/hashcat",
        params: &[
            required("hash_file"),
            text_or("wordlist", ROCKYOU),
            text("hash_type"),
            count_or("attack_mode", "0"),
            EXTRA,
        ],
        target: TargetKey::Basename("hash_file"),
        formatter: Formatter::Raw,
    },
    ToolDescriptor {
        name: "openvas",
        endpoint: "api/tools/openvas",
        params: &[required("target"), EXTRA],
        target: TargetKey::Param("target"),
        formatter: Formatter::Report { title: "OpenVAS" },
    },
    ToolDescriptor {
        name: "nuclei",
        endpoint: "api/tools/nuclei",
        params: &[
            required("target"),
            text("templates"),
            text_or("severity", "critical,high,medium"),
            EXTRA,
        ],
        target: TargetKey::Param("target"),
        formatter: Formatter::Report { title: "Nuclei" },
    },
    ToolDescriptor {
        name: "masscan",
        endpoint: "api/tools/masscan",
        params: &[required("target"), text_or("ports", "1-65535"), count_or("rate", "1000"), EXTRA],
        target: TargetKey::Param("target"),
        formatter: Formatter::Report { title: "Masscan" },
    },
    ToolDescriptor {
        name: "subfinder",
        endpoint: "api/tools/subfinder",
        params: &[required("domain"), text_or("additional_args", "-silent")],
        target: TargetKey::Param("domain"),
        formatter: Formatter::Report { title: "Subfinder" },
    },
    ToolDescriptor {
        name: "searchsploit",
        endpoint: "api/tools/searchsploit",
        params: &[required("query"), EXTRA],
        target: TargetKey::Param("query"),
        formatter: Formatter::Report { title: "SearchSploit" },
    },
    ToolDescriptor {
        name: "whatweb",
        endpoint: "api/tools/whatweb",
        params: &[required("target"), count_or("aggression", "1"), EXTRA],
        target: TargetKey::Param("target"),
        formatter: Formatter::Report { title: "WhatWeb" },
    },
];

pub fn registry() -> &'static [ToolDescriptor] {
    TOOLS
}

pub fn lookup(name: &str) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|t| t.name == name)
}

impl ToolDescriptor {
    fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Build the request body from `key=value` arguments. Defaults are filled
    /// in and required parameters checked before anything is sent.
    pub fn payload<S: AsRef<str>>(&self, args: &[S]) -> Result<Map<String, Value>, ArgError> {
        let mut payload = Map::new();
        for arg in args {
            let arg = arg.as_ref();
            let Some((key, value)) = arg.split_once('=') else {
                return Err(ArgError::Malformed(arg.to_string()));
            };
            let (name, sub_key) = match key.split_once('.') {
                Some((name, sub)) => (name, Some(sub)),
                None => (key, None),
            };
            let spec = self
                .param(name)
                .filter(|spec| (spec.kind == ParamKind::Options) == sub_key.is_some())
                .ok_or_else(|| self.unknown(key))?;

            match (spec.kind, sub_key) {
                (ParamKind::Options, Some(sub)) => {
                    let entry =
                        payload.entry(spec.name).or_insert_with(|| Value::Object(Map::new()));
                    if let Value::Object(map) = entry {
                        map.insert(sub.to_string(), Value::String(value.to_string()));
                    }
                }
                (ParamKind::Count, _) => {
                    payload.insert(spec.name.to_string(), count(spec.name, value)?);
                }
                _ => {
                    payload.insert(spec.name.to_string(), Value::String(value.to_string()));
                }
            }
        }

        for spec in self.params {
            if payload.contains_key(spec.name) {
                continue;
            }
            if spec.required {
                return Err(ArgError::Missing { tool: self.name, key: spec.name });
            }
            if let Some(default) = spec.default {
                let value = match spec.kind {
                    ParamKind::Count => count(spec.name, default)?,
                    _ => Value::String(default.to_string()),
                };
                payload.insert(spec.name.to_string(), value);
            }
        }
        for spec in self.params.iter().filter(|p| p.required) {
            if payload.get(spec.name).and_then(Value::as_str).is_some_and(|s| s.trim().is_empty()) {
                return Err(ArgError::Missing { tool: self.name, key: spec.name });
            }
        }
        Ok(payload)
    }

    fn unknown(&self, key: &str) -> ArgError {
        let expected: Vec<String> = self
            .params
            .iter()
            .map(|p| match p.kind {
                ParamKind::Options => format!("{}.KEY", p.name),
                _ => p.name.to_string(),
            })
            .collect();
        ArgError::Unknown { tool: self.name, key: key.to_string(), expected: expected.join(", ") }
    }

    /// What the result file is named after.
    pub fn target(&self, payload: &Map<String, Value>) -> String {
        let get = |key: &str| payload.get(key).map(value_text).unwrap_or_default();
        match self.target {
            TargetKey::Param(key) => get(key),
            TargetKey::Joined(a, b) => format!("{}_{}", get(a), get(b)),
            TargetKey::Basename(key) => {
                let path = get(key);
                path.rsplit('/').next().unwrap_or_default().to_string()
            }
            TargetKey::ModuleHost => {
                let option = |key: &str| {
                    payload.get("options").and_then(|o| o.get(key)).map(value_text)
                };
                option("RHOSTS").or_else(|| option("RHOST")).unwrap_or_else(|| {
                    get("module").rsplit('/').next().unwrap_or_default().to_string()
                })
            }
        }
    }
}

fn count(key: &'static str, value: &str) -> Result<Value, ArgError> {
    value
        .trim()
        .parse::<u64>()
        .map(Value::from)
        .map_err(|_| ArgError::NotACount { key, value: value.to_string() })
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "tools_tests.rs"]
mod tests;
