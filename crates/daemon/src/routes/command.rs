// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{Map, Value};
use sr_core::ToolResponse;

use crate::endpoint::Invocation;
use crate::error::{ApiError, ApiResult};
use crate::extract::CallerAddr;
use crate::state::AppState;
use crate::tools::{Params, Prepared};

/// Ledger tool name for passthrough invocations.
const COMMAND_TOOL: &str = "command";

/// `POST /api/command`: runs `{command}` through `sh -c`.
///
/// The only route that hands caller input to a shell.
pub async fn run_command(
    State(state): State<AppState>,
    caller: CallerAddr,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Json<ToolResponse>> {
    let Json(parameters) = body?;
    let command = Params::new(&parameters)
        .optional("command")?
        .ok_or_else(|| ApiError::bad_request("Command parameter is required"))?;
    tracing::info!(caller = %caller, command = %command, "command request");

    let prepared = Prepared::shell(command, state.endpoint.work_dir());
    let invocation =
        Invocation { tool: COMMAND_TOOL.to_string(), parameters, caller: caller.0, prepared };
    state.endpoint.execute(invocation).await.map(Json)
}
