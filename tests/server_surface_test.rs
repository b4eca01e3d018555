// ABOUTME: Integration tests for the liveness page, smoke endpoints, and CORS surface
// ABOUTME: Exercises the bootstrapper-owned routes outside the API groups
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

const DEV_ORIGIN: &str = "http://localhost:5173";

#[tokio::test]
async fn test_liveness_text_without_a_frontend_bundle() -> Result<()> {
    let app = common::bootstrap_test_app().await?;

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    assert_eq!(&bytes[..], b"Meal Mind Backend is running!");
    Ok(())
}

#[tokio::test]
async fn test_api_smoke_endpoints() -> Result<()> {
    let app = common::bootstrap_test_app().await?;

    let (status, body) =
        common::request(&app.router, Method::GET, "/api/test", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "API is working!");

    let (status, body) =
        common::request(&app.router, Method::GET, "/api/cors-test", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "CORS is working!");
    Ok(())
}

#[tokio::test]
async fn test_unknown_paths_get_json_404() -> Result<()> {
    let app = common::bootstrap_test_app().await?;

    let (status, body) =
        common::request(&app.router, Method::GET, "/definitely/missing", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Resource not found");

    let (status, body) =
        common::request(&app.router, Method::POST, "/api/unknown", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Resource not found");
    Ok(())
}

#[tokio::test]
async fn test_preflight_allows_the_dev_frontend() -> Result<()> {
    let app = common::bootstrap_test_app().await?;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/auth/login")
        .header("origin", DEV_ORIGIN)
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type,authorization")
        .body(Body::empty())?;
    let response = app.router.clone().oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(DEV_ORIGIN)
    );
    assert_eq!(
        headers
            .get("access-control-allow-credentials")
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
    let methods = headers
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(methods.contains("POST") && methods.contains("DELETE"));
    let allowed_headers = headers
        .get("access-control-allow-headers")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(allowed_headers.contains("content-type"));
    assert!(allowed_headers.contains("authorization"));
    Ok(())
}

#[tokio::test]
async fn test_preflight_from_unknown_origins_gets_no_allowance() -> Result<()> {
    let app = common::bootstrap_test_app().await?;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/auth/login")
        .header("origin", "http://evil.example")
        .header("access-control-request-method", "POST")
        .body(Body::empty())?;
    let response = app.router.clone().oneshot(request).await?;

    assert!(response.headers().get("access-control-allow-origin").is_none());
    Ok(())
}

#[tokio::test]
async fn test_cross_origin_responses_carry_allow_origin() -> Result<()> {
    let app = common::bootstrap_test_app().await?;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/cors-test")
        .header("origin", DEV_ORIGIN)
        .body(Body::empty())?;
    let response = app.router.clone().oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(DEV_ORIGIN)
    );
    Ok(())
}
