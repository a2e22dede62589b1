// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP routes.

mod command;
mod health;
mod scans;
mod tools;

use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::auth::require_api_key;
use crate::state::AppState;

pub use health::binary_on_path;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/tools/{tool}", post(tools::run_tool))
        .route("/command", post(command::run_command))
        .route("/scans/history", get(scans::history))
        .route("/scans/{scan_id}", get(scans::show))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
