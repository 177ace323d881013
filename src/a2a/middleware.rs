//! Request middleware for the A2A gateway.
//!
//! For every request: logs method, path and body, runs the rest of the
//! request inside the `X-API-Key` credential scope when the header is set,
//! and logs the body of JSON responses.

use crate::a2a::credential::{API_KEY_HEADER, ApiKey, with_credential};
use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Largest request or response body the middleware buffers.
pub const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

pub async fn request_middleware(req: Request, next: Next) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!("→ {} {} rejected: {}", parts.method, parts.uri.path(), e);
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    tracing::info!("→ {} {}", parts.method, parts.uri.path());
    tracing::info!("  Request: {}", render_body(&bytes));

    let api_key = parts
        .headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(ApiKey::from);

    let req = Request::from_parts(parts, Body::from(bytes));
    let response = match api_key {
        Some(key) => with_credential(key, next.run(req)).await,
        None => next.run(req).await,
    };

    log_response(response).await
}

/// Log the body of JSON responses and hand the response back unchanged.
async fn log_response(response: Response) -> Response {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));
    if !is_json {
        return response;
    }

    let (parts, body) = response.into_parts();
    match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => {
            tracing::info!("← Response: {}", render_body(&bytes));
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            tracing::error!("← Failed to buffer response body: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read response body").into_response()
        }
    }
}

/// Pretty-print JSON bodies, fall back to lossy UTF-8 for anything else.
fn render_body(bytes: &Bytes) -> String {
    if bytes.is_empty() {
        return "{}".to_string();
    }
    serde_json::from_slice::<serde_json::Value>(bytes)
        .and_then(|v| serde_json::to_string_pretty(&v))
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned())
}
