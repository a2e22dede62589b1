// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for the srd daemon.
//!
//! Tool calls never fail at this layer: every response, including rate
//! limiting, capacity rejection and transport errors, is folded into a
//! [`ResultOutcome`] so the caller can persist it and decide what to do next.

use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;
use serde_json::Value;
use sr_core::{ResultOutcome, ToolResponse};
use thiserror::Error;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Default daemon address.
pub const DEFAULT_SERVER: &str = "http://localhost:5000";

/// Errors from the query endpoints (health, history, scan details).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP error: {message}")]
    Status { status: u16, message: String },
    #[error("Invalid response body: {0}")]
    Body(String),
}

#[derive(Debug, Clone)]
pub struct ResultClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ResultClient {
    pub fn new(server: &str, timeout: Duration, api_key: Option<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let api_key = api_key.filter(|k| !k.is_empty());
        if api_key.is_none() {
            tracing::debug!("no API key configured, requests are unauthenticated");
        }
        Ok(Self { http, base_url: normalize_server(server), api_key })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    /// POST `payload` to `endpoint` and classify the response. No retries.
    pub async fn send(&self, endpoint: &str, payload: &Value) -> ResultOutcome {
        let url = self.url(endpoint);
        tracing::debug!(%url, "POST");
        let response = match self.authorize(self.http.post(&url).json(payload)).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(%url, error = %e, "request failed");
                return ResultOutcome::Error { message: format!("Request failed: {e}"), status_code: None };
            }
        };

        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                return ResultOutcome::Error {
                    message: format!("Request failed: {e}"),
                    status_code: Some(status.as_u16()),
                }
            }
        };

        let outcome = classify_response(status, retry_after, &body);
        match &outcome {
            ResultOutcome::RateLimited { .. } => tracing::warn!(endpoint, "rate limit exceeded"),
            ResultOutcome::CapacityReached => {
                tracing::warn!(endpoint, "service unavailable, concurrent scan limit likely reached")
            }
            ResultOutcome::Error { message, .. } => tracing::error!(endpoint, %message),
            ResultOutcome::Completed { .. } => {}
        }
        outcome
    }

    /// GET `endpoint` and return the decoded JSON body.
    pub async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value, ClientError> {
        let url = self.url(endpoint);
        tracing::debug!(%url, ?query, "GET");
        let response = self.authorize(self.http.get(&url).query(query)).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(ClientError::Status { status: status.as_u16(), message: error_message(status, &body) });
        }
        serde_json::from_slice(&body).map_err(|e| ClientError::Body(e.to_string()))
    }
}

/// Prefix `http://` when no scheme is given and drop trailing slashes.
pub fn normalize_server(raw: &str) -> String {
    let raw = raw.trim();
    let url = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };
    url.trim_end_matches('/').to_string()
}

/// Classify one HTTP response. 429 and 503 are checked before anything else.
pub fn classify_response(status: StatusCode, retry_after: Option<String>, body: &[u8]) -> ResultOutcome {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return ResultOutcome::RateLimited { retry_after };
    }
    if status == StatusCode::SERVICE_UNAVAILABLE {
        return ResultOutcome::CapacityReached;
    }
    if !status.is_success() {
        return ResultOutcome::Error {
            message: format!("HTTP error: {}", error_message(status, body)),
            status_code: Some(status.as_u16()),
        };
    }
    match serde_json::from_slice::<ToolResponse>(body) {
        Ok(body) => ResultOutcome::Completed { status: status.as_u16(), body },
        Err(e) => ResultOutcome::Error {
            message: format!("Invalid response body: {e}"),
            status_code: Some(status.as_u16()),
        },
    }
}

/// `"400 Bad Request: <server error>"`, falling back to the status line.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    let detail = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string));
    match detail {
        Some(detail) => format!("{status}: {detail}"),
        None => status.to_string(),
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
