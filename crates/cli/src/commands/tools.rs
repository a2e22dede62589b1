// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use super::Context;
use crate::color;
use crate::output::handle_list;
use crate::tools::{registry, ParamKind, ParamSpec};

#[derive(Serialize)]
struct ToolRow {
    name: &'static str,
    endpoint: &'static str,
    params: Vec<ParamRow>,
}

#[derive(Serialize)]
struct ParamRow {
    name: &'static str,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<&'static str>,
}

fn usage(spec: &ParamSpec) -> String {
    let name = match spec.kind {
        ParamKind::Options => format!("{}.KEY", spec.name),
        _ => spec.name.to_string(),
    };
    match (spec.required, spec.default) {
        (true, _) => format!("{name}=<value>"),
        (false, Some(default)) => format!("[{name}={default}]"),
        (false, None) => format!("[{name}]"),
    }
}

pub fn list(ctx: &Context) -> Result<()> {
    let rows: Vec<ToolRow> = registry()
        .iter()
        .map(|tool| ToolRow {
            name: tool.name,
            endpoint: tool.endpoint,
            params: tool
                .params
                .iter()
                .map(|p| ParamRow { name: p.name, required: p.required, default: p.default })
                .collect(),
        })
        .collect();

    handle_list(ctx.format, &rows, "No tools registered", |_, out| {
        for tool in registry() {
            let params: Vec<String> = tool.params.iter().map(usage).collect();
            writeln!(
                out,
                "{} {}",
                color::header(&format!("{:<14}", tool.name)),
                color::muted(&params.join(" "))
            )?;
        }
        Ok(())
    })
}
