// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides app bootstrapping, request helpers, and signup flows
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `mealmind_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests. Everything here goes through the crate's
//! public API only.

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request as HttpRequest, StatusCode},
    Router,
};
use mealmind_server::{
    config::{EnvSettings, ServerConfig},
    server::{
        bootstrap::{self, BootstrappedApp},
        startup::{self, StartupOutcome},
    },
};
use serde_json::{json, Value};
use std::sync::{Arc, Once};
use tower::ServiceExt;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Testing-profile configuration backed by an in-memory database
pub fn test_config() -> ServerConfig {
    ServerConfig::resolve(Some("testing"), &EnvSettings::default())
        .expect("testing profile must resolve")
}

/// Bootstrap the application without seeding
pub async fn bootstrap_test_app() -> Result<BootstrappedApp> {
    init_test_logging();
    bootstrap::create_app_with_config(Arc::new(test_config())).await
}

/// Run the full startup sequence (schema plus demo data) on a fresh database
pub async fn bootstrap_seeded_app() -> Result<StartupOutcome> {
    init_test_logging();
    startup::run_with_config(Arc::new(test_config())).await
}

/// Drive one request through the router and decode the JSON body
///
/// Returns `Value::Null` for empty bodies such as 204 responses.
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = HttpRequest::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

/// Sign up a fresh user and return their bearer token
pub async fn signup(app: &Router, email: &str, username: &str, password: &str) -> Result<String> {
    let (status, body) = request(
        app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "email": email, "username": username, "password": password })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");

    Ok(body["token"]
        .as_str()
        .expect("signup response carries a token")
        .to_owned())
}

/// Sign up a user and store a complete profile for them
pub async fn signup_with_profile(app: &Router, email: &str, username: &str) -> Result<String> {
    let token = signup(app, email, username, "password123").await?;
    let (status, body) = request(
        app,
        Method::POST,
        "/api/profile/setup",
        Some(&token),
        Some(json!({
            "weight_kg": 80.0,
            "height_cm": 180.0,
            "age": 30,
            "gender": "male",
            "activity_level": "moderate",
            "target_weight_kg": 75.0
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED, "profile setup failed: {body}");
    Ok(token)
}
