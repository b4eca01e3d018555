// ABOUTME: Integration tests for demo data seeding at startup
// ABOUTME: Verifies seeded accounts log in over HTTP and reseeding is a no-op
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use axum::Router;
use mealmind_server::database_plugins::DatabaseProvider;
use mealmind_server::seed::{self, SeedOutcome};
use serde_json::json;

async fn login(app: &Router, email: &str, password: &str) -> Result<(StatusCode, serde_json::Value)> {
    common::request(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

#[tokio::test]
async fn test_startup_seeds_accounts_and_catalogs() -> Result<()> {
    let outcome = common::bootstrap_seeded_app().await?;

    assert_eq!(outcome.seed, SeedOutcome::Seeded);
    assert!(outcome.app.report.is_complete());
    assert_eq!(outcome.app.resources.database.get_user_count().await?, 2);
    assert!(outcome.app.resources.database.get_food_item_count().await? > 0);
    Ok(())
}

#[tokio::test]
async fn test_seeded_accounts_log_in_over_http() -> Result<()> {
    let outcome = common::bootstrap_seeded_app().await?;
    let app = &outcome.app.router;

    let (status, body) = login(app, "admin@mealmind.com", "admin123").await?;
    assert_eq!(status, StatusCode::OK, "admin login failed: {body}");
    assert_eq!(body["user"]["username"], "admin");

    let (status, body) = login(app, "test@mealmind.com", "test123").await?;
    assert_eq!(status, StatusCode::OK, "test login failed: {body}");
    assert_eq!(body["user"]["username"], "testuser");
    Ok(())
}

#[tokio::test]
async fn test_only_the_test_account_gets_a_profile() -> Result<()> {
    let outcome = common::bootstrap_seeded_app().await?;
    let app = &outcome.app.router;

    let (_, body) = login(app, "test@mealmind.com", "test123").await?;
    let token = body["token"].as_str().unwrap().to_owned();
    let (status, profile) =
        common::request(app, Method::GET, "/api/profile/get", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["target_weight_kg"], 65.0);

    let (_, body) = login(app, "admin@mealmind.com", "admin123").await?;
    let token = body["token"].as_str().unwrap().to_owned();
    let (status, body) =
        common::request(app, Method::GET, "/api/profile/get", Some(&token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Profile not found");
    Ok(())
}

#[tokio::test]
async fn test_reseeding_a_populated_database_is_skipped() -> Result<()> {
    let outcome = common::bootstrap_seeded_app().await?;
    let database = &outcome.app.resources.database;

    assert_eq!(seed::seed_all(database).await?, SeedOutcome::Skipped);
    assert_eq!(database.get_user_count().await?, 2);
    Ok(())
}

#[tokio::test]
async fn test_seeded_catalog_feeds_the_activity_routes() -> Result<()> {
    let outcome = common::bootstrap_seeded_app().await?;
    let app = &outcome.app.router;

    let (_, body) = login(app, "admin@mealmind.com", "admin123").await?;
    let token = body["token"].as_str().unwrap().to_owned();

    let (status, body) =
        common::request(app, Method::GET, "/api/activities", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    let activities = body["activities"].as_array().expect("activities array");
    assert!(!activities.is_empty());
    Ok(())
}
