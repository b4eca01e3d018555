// ABOUTME: Static asset serving with SPA fallback plus the liveness and smoke endpoints
// ABOUTME: Serves a bundled frontend when present and JSON 404 bodies when not
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Static File Handlers
//!
//! When a frontend bundle is deployed under `static/`, these handlers serve
//! it with SPA routing: unknown GET paths resolve to the bundle's
//! `index.html` so client-side routes survive a page reload. Without a
//! bundle, `/` degrades to a plain-text liveness string and unmatched paths
//! return the JSON 404 body.

use crate::constants::{error_messages, status_messages};
use axum::{
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::Path;

/// Directory holding the optional frontend bundle, relative to the working directory
pub const STATIC_DIR: &str = "static";

/// `GET /` index page or liveness string
pub async fn handle_index() -> Response {
    match read_static("index.html").await {
        Some(bytes) => html_response(bytes),
        None => status_messages::BACKEND_RUNNING.into_response(),
    }
}

/// `GET /api/test` smoke endpoint
pub async fn handle_api_test() -> Response {
    Json(json!({ "message": status_messages::API_WORKING })).into_response()
}

/// `GET /api/cors-test` smoke endpoint for browser CORS checks
pub async fn handle_cors_test() -> Response {
    Json(json!({ "message": status_messages::CORS_WORKING })).into_response()
}

/// Router fallback: static file, then SPA shell, then JSON 404
pub async fn handle_fallback(method: Method, uri: Uri) -> Response {
    if method != Method::GET {
        return not_found_response();
    }

    let Some(relative) = sanitize_path(uri.path()) else {
        return not_found_response();
    };

    if let Some(bytes) = read_static(&relative).await {
        return file_response(&relative, bytes);
    }

    // Client-side routes resolve to the SPA shell when a bundle is present
    match read_static("index.html").await {
        Some(bytes) => html_response(bytes),
        None => not_found_response(),
    }
}

/// The JSON body every unmatched path receives
fn not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": error_messages::RESOURCE_NOT_FOUND })),
    )
        .into_response()
}

async fn read_static(relative: &str) -> Option<Vec<u8>> {
    tokio::fs::read(Path::new(STATIC_DIR).join(relative))
        .await
        .ok()
}

/// Normalize a request path into a bundle-relative file path.
///
/// Returns `None` for the root path and for any path containing empty,
/// dot, or parent-directory segments; lookups never escape `static/`.
fn sanitize_path(path: &str) -> Option<String> {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    let clean = trimmed
        .split('/')
        .all(|segment| !segment.is_empty() && segment != "." && segment != ".." && !segment.contains('\\'));
    clean.then(|| trimmed.to_owned())
}

fn html_response(bytes: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], bytes).into_response()
}

fn file_response(relative: &str, bytes: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, content_type_for(relative))], bytes).into_response()
}

/// Content type from the file extension; bundles only contain a handful of kinds
fn content_type_for(relative: &str) -> &'static str {
    match relative.rsplit('.').next() {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json" | "map") => "application/json",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
