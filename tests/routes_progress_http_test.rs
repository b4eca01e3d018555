// ABOUTME: HTTP integration tests for weight history and progress summaries
// ABOUTME: Verifies series ordering, null-weight handling, and change arithmetic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use axum::Router;
use serde_json::json;

async fn checkin(app: &Router, token: &str, date: &str, weight_kg: Option<f64>) -> Result<()> {
    let body = match weight_kg {
        Some(weight_kg) => json!({ "date": date, "weight_kg": weight_kg }),
        None => json!({ "date": date, "meals_followed": true }),
    };
    let (status, response) = common::request(
        app,
        Method::POST,
        "/api/recommendations/checkin",
        Some(token),
        Some(body),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED, "checkin failed: {response}");
    Ok(())
}

#[tokio::test]
async fn test_weight_history_requires_authentication() -> Result<()> {
    let app = common::bootstrap_test_app().await?;

    let (status, _) =
        common::request(&app.router, Method::GET, "/api/progress/weight", None, None).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_weight_series_is_ascending_and_skips_blank_days() -> Result<()> {
    let app = common::bootstrap_test_app().await?;
    let token = common::signup_with_profile(&app.router, "alice@example.com", "alice").await?;

    checkin(&app.router, &token, "2026-08-20", Some(78.0)).await?;
    checkin(&app.router, &token, "2026-08-18", Some(79.5)).await?;
    checkin(&app.router, &token, "2026-08-19", None).await?;

    let (status, body) = common::request(
        &app.router,
        Method::GET,
        "/api/progress/weight",
        Some(&token),
        None,
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["weights"][0]["date"], "2026-08-18");
    assert_eq!(body["weights"][0]["weight_kg"], 79.5);
    assert_eq!(body["weights"][1]["date"], "2026-08-20");
    assert_eq!(body["weights"][1]["weight_kg"], 78.0);
    Ok(())
}

#[tokio::test]
async fn test_summary_tracks_recorded_change() -> Result<()> {
    let app = common::bootstrap_test_app().await?;
    let token = common::signup_with_profile(&app.router, "bob@example.com", "bob").await?;

    checkin(&app.router, &token, "2026-08-18", Some(79.0)).await?;
    checkin(&app.router, &token, "2026-08-19", None).await?;
    checkin(&app.router, &token, "2026-08-20", Some(78.0)).await?;

    let (status, body) = common::request(
        &app.router,
        Method::GET,
        "/api/progress/summary",
        Some(&token),
        None,
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["starting_weight_kg"], 79.0);
    assert_eq!(body["current_weight_kg"], 78.0);
    assert_eq!(body["change_kg"], -1.0);
    assert_eq!(body["target_weight_kg"], 75.0);
    assert_eq!(body["checkin_count"], 3);
    Ok(())
}

#[tokio::test]
async fn test_summary_falls_back_to_profile_weight() -> Result<()> {
    let app = common::bootstrap_test_app().await?;
    let token = common::signup_with_profile(&app.router, "carol@example.com", "carol").await?;

    let (status, body) = common::request(
        &app.router,
        Method::GET,
        "/api/progress/summary",
        Some(&token),
        None,
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["starting_weight_kg"], 80.0);
    assert_eq!(body["current_weight_kg"], 80.0);
    assert_eq!(body["change_kg"], 0.0);
    assert_eq!(body["checkin_count"], 0);
    Ok(())
}

#[tokio::test]
async fn test_summary_without_profile_is_not_found() -> Result<()> {
    let app = common::bootstrap_test_app().await?;
    let token = common::signup(&app.router, "dave@example.com", "dave", "password123").await?;

    let (status, body) = common::request(
        &app.router,
        Method::GET,
        "/api/progress/summary",
        Some(&token),
        None,
    )
    .await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Profile not found");
    Ok(())
}
