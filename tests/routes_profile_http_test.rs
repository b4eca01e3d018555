// ABOUTME: HTTP integration tests for profile setup, retrieval, and updates
// ABOUTME: Covers validation bounds, partial updates, and restriction clearing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_setup_requires_authentication() -> Result<()> {
    let app = common::bootstrap_test_app().await?;

    let (status, _) = common::request(
        &app.router,
        Method::POST,
        "/api/profile/setup",
        None,
        Some(json!({
            "weight_kg": 80.0,
            "height_cm": 180.0,
            "age": 30,
            "gender": "male",
            "activity_level": "moderate"
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_setup_then_get_roundtrip() -> Result<()> {
    let app = common::bootstrap_test_app().await?;
    let token = common::signup(&app.router, "alice@example.com", "alice", "password123").await?;

    let (status, created) = common::request(
        &app.router,
        Method::POST,
        "/api/profile/setup",
        Some(&token),
        Some(json!({
            "weight_kg": 80.0,
            "height_cm": 180.0,
            "age": 30,
            "gender": "female",
            "activity_level": "moderate",
            "dietary_restrictions": "vegetarian",
            "target_weight_kg": 72.0
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["weight_kg"], 80.0);

    let (status, body) =
        common::request(&app.router, Method::GET, "/api/profile/get", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weight_kg"], 80.0);
    assert_eq!(body["height_cm"], 180.0);
    assert_eq!(body["age"], 30);
    assert_eq!(body["gender"], "female");
    assert_eq!(body["activity_level"], "moderate");
    assert_eq!(body["dietary_restrictions"], "vegetarian");
    assert_eq!(body["target_weight_kg"], 72.0);
    Ok(())
}

#[tokio::test]
async fn test_setup_twice_conflicts() -> Result<()> {
    let app = common::bootstrap_test_app().await?;
    let token = common::signup_with_profile(&app.router, "bob@example.com", "bob").await?;

    let (status, body) = common::request(
        &app.router,
        Method::POST,
        "/api/profile/setup",
        Some(&token),
        Some(json!({
            "weight_kg": 90.0,
            "height_cm": 185.0,
            "age": 40,
            "gender": "male",
            "activity_level": "light"
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Profile already exists");
    Ok(())
}

#[tokio::test]
async fn test_get_without_profile_is_not_found() -> Result<()> {
    let app = common::bootstrap_test_app().await?;
    let token = common::signup(&app.router, "carol@example.com", "carol", "password123").await?;

    let (status, body) =
        common::request(&app.router, Method::GET, "/api/profile/get", Some(&token), None).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Profile not found");
    Ok(())
}

#[tokio::test]
async fn test_setup_rejects_out_of_range_metrics() -> Result<()> {
    let app = common::bootstrap_test_app().await?;
    let token = common::signup(&app.router, "dave@example.com", "dave", "password123").await?;

    let (status, body) = common::request(
        &app.router,
        Method::POST,
        "/api/profile/setup",
        Some(&token),
        Some(json!({
            "weight_kg": 80.0,
            "height_cm": 180.0,
            "age": 5,
            "gender": "male",
            "activity_level": "moderate"
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Age must be between 13 and 120");
    Ok(())
}

#[tokio::test]
async fn test_partial_update_preserves_other_fields() -> Result<()> {
    let app = common::bootstrap_test_app().await?;
    let token = common::signup_with_profile(&app.router, "erin@example.com", "erin").await?;

    let (status, updated) = common::request(
        &app.router,
        Method::PUT,
        "/api/profile/update",
        Some(&token),
        Some(json!({ "weight_kg": 78.5 })),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["weight_kg"], 78.5);
    assert_eq!(updated["height_cm"], 180.0);
    assert_eq!(updated["age"], 30);
    assert_eq!(updated["activity_level"], "moderate");
    assert_eq!(updated["target_weight_kg"], 75.0);
    Ok(())
}

#[tokio::test]
async fn test_update_validates_the_merged_record() -> Result<()> {
    let app = common::bootstrap_test_app().await?;
    let token = common::signup_with_profile(&app.router, "frank@example.com", "frank").await?;

    let (status, body) = common::request(
        &app.router,
        Method::PUT,
        "/api/profile/update",
        Some(&token),
        Some(json!({ "weight_kg": 10.0 })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Weight must be between 20 and 500 kg");
    Ok(())
}

#[tokio::test]
async fn test_blank_restrictions_clear_the_stored_value() -> Result<()> {
    let app = common::bootstrap_test_app().await?;
    let token = common::signup(&app.router, "grace@example.com", "grace", "password123").await?;

    common::request(
        &app.router,
        Method::POST,
        "/api/profile/setup",
        Some(&token),
        Some(json!({
            "weight_kg": 70.0,
            "height_cm": 170.0,
            "age": 28,
            "gender": "female",
            "activity_level": "active",
            "dietary_restrictions": "vegetarian"
        })),
    )
    .await?;

    let (status, body) = common::request(
        &app.router,
        Method::PUT,
        "/api/profile/update",
        Some(&token),
        Some(json!({ "dietary_restrictions": "   " })),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert!(body["dietary_restrictions"].is_null());
    Ok(())
}

#[tokio::test]
async fn test_update_without_profile_is_not_found() -> Result<()> {
    let app = common::bootstrap_test_app().await?;
    let token = common::signup(&app.router, "henry@example.com", "henry", "password123").await?;

    let (status, body) = common::request(
        &app.router,
        Method::PUT,
        "/api/profile/update",
        Some(&token),
        Some(json!({ "weight_kg": 75.0 })),
    )
    .await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Profile not found");
    Ok(())
}
