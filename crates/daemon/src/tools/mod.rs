// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool templates.
//!
//! Each supported tool is one [`ToolSpec`] row: the name callers use, the
//! binary it runs, whether `/health` counts it as essential, and a builder
//! that turns request parameters into an argv [`Plan`]. Builders do no I/O.
//! Files they need (resource scripts, output files) are reserved through
//! [`Artifacts`] and written and removed by [`Prepared::execute`].

mod args;
mod catalog;
mod output;
mod params;
mod plan;

use std::path::Path;

use serde_json::{Map, Value};

pub use args::{has_flag, split_args, SplitError};
pub use output::{parse_json_lines, parse_json_results, OutputParser};
pub use params::{Params, ToolError};
pub use plan::{Artifacts, Executed, Plan, Prepared};

type Builder = fn(Params<'_>, &mut Artifacts) -> Result<Plan, ToolError>;

#[derive(Debug)]
pub struct ToolSpec {
    pub name: &'static str,
    pub binary: &'static str,
    pub essential: bool,
    build: Builder,
}

impl ToolSpec {
    /// Validate `params` and build the plan, with artifacts under `work_dir`.
    pub fn prepare(&self, params: &Map<String, Value>, work_dir: &Path) -> Result<Prepared, ToolError> {
        let mut artifacts = Artifacts::new(work_dir);
        let plan = (self.build)(Params::new(params), &mut artifacts)?;
        Ok(Prepared { plan, artifacts })
    }
}

/// Every supported tool, in display order.
pub fn registry() -> &'static [ToolSpec] {
    catalog::TOOLS
}

pub fn lookup(name: &str) -> Option<&'static ToolSpec> {
    catalog::TOOLS.iter().find(|spec| spec.name == name)
}
