// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{Map, Value};
use sr_core::ToolResponse;

use crate::endpoint::Invocation;
use crate::error::{ApiError, ApiResult};
use crate::extract::CallerAddr;
use crate::state::AppState;

/// `POST /api/tools/{tool}`
pub async fn run_tool(
    State(state): State<AppState>,
    Path(tool): Path<String>,
    caller: CallerAddr,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Json<ToolResponse>> {
    let spec = crate::tools::lookup(&tool)
        .ok_or_else(|| ApiError::not_found(format!("Unknown tool: {tool}")))?;
    let Json(parameters) = body?;

    let prepared = spec.prepare(&parameters, state.endpoint.work_dir()).inspect_err(|e| {
        tracing::warn!(tool = spec.name, caller = %caller, error = %e, "rejected tool request");
    })?;
    tracing::info!(tool = spec.name, caller = %caller, "tool request");

    let invocation = Invocation { tool: spec.name.to_string(), parameters, caller: caller.0, prepared };
    state.endpoint.execute(invocation).await.map(Json)
}
