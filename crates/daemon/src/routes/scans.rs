// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use sr_core::{ScanId, ScanRecord, ScanStatus};
use sr_storage::ScanFilter;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const DEFAULT_HISTORY_LIMIT: usize = 20;

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
    pub tool: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct History {
    pub total: usize,
    pub scans: Vec<ScanRecord>,
}

/// `GET /api/scans/history`: most recent first.
pub async fn history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> ApiResult<Json<History>> {
    let Query(query) = query?;
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<ScanStatus>)
        .transpose()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let filter = ScanFilter {
        tool: query.tool.filter(|t| !t.is_empty()),
        status,
        limit: Some(query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT)),
    };
    let scans = state.ledger().list_filtered(&filter);
    Ok(Json(History { total: scans.len(), scans }))
}

/// `GET /api/scans/{scan_id}`
pub async fn show(
    State(state): State<AppState>,
    Path(scan_id): Path<String>,
) -> ApiResult<Json<ScanRecord>> {
    let not_found = || ApiError::not_found("Scan not found");
    let id = ScanId::parse(&scan_id).map_err(|_| not_found())?;
    match state.ledger().get(&id) {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err(not_found()),
        Err(e) => {
            tracing::warn!(scan_id = %id, error = %e, "failed to read scan record");
            Err(ApiError::server(e))
        }
    }
}
