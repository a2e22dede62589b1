// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared-secret authentication for `/api/*`.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;
use crate::extract::CallerAddr;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

pub async fn require_api_key(
    State(state): State<AppState>,
    caller: CallerAddr,
    request: Request,
    next: Next,
) -> Response {
    if let Some(expected) = state.api_key.as_deref() {
        let provided = request.headers().get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
        if !provided.is_some_and(|key| keys_match(key, expected)) {
            tracing::warn!(caller = %caller, path = %request.uri().path(), "invalid API key");
            return ApiError::unauthorized().into_response();
        }
    }
    next.run(request).await
}

/// Comparison whose duration does not depend on where the keys differ.
fn keys_match(provided: &str, expected: &str) -> bool {
    let (a, b) = (provided.as_bytes(), expected.as_bytes());
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
