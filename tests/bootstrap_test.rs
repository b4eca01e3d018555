// ABOUTME: Integration tests for application bootstrap and route registration
// ABOUTME: Drives the assembled router end to end against an in-memory database
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use axum::{
    http::{Method, StatusCode},
    Router,
};
use mealmind_server::resources::ServerResources;
use mealmind_server::routes::{register_route_groups, AuthRoutes, RouteGroup, ROUTE_GROUPS};
use std::sync::Arc;

#[tokio::test]
async fn test_route_table_mounts_completely() -> Result<()> {
    let app = common::bootstrap_test_app().await?;

    assert!(app.report.is_complete());
    assert_eq!(app.report.registered.len(), ROUTE_GROUPS.len());
    for group in ROUTE_GROUPS {
        assert!(
            app.report.registered.contains(&group.name),
            "group '{}' missing from the report",
            group.name
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_unknown_api_path_returns_json_404() -> Result<()> {
    let app = common::bootstrap_test_app().await?;

    let (status, body) =
        common::request(&app.router, Method::GET, "/api/definitely-missing", None, None).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Resource not found");
    Ok(())
}

fn failing_group(_resources: Arc<ServerResources>) -> Result<Router> {
    anyhow::bail!("route table refused to build")
}

#[tokio::test]
async fn test_broken_group_leaves_the_rest_serving() -> Result<()> {
    let app = common::bootstrap_test_app().await?;
    let groups = [
        RouteGroup {
            name: "auth",
            prefix: "/api/auth",
            build: AuthRoutes::router,
        },
        RouteGroup {
            name: "broken",
            prefix: "/api/broken",
            build: failing_group,
        },
    ];

    let (router, report) = register_route_groups(&groups, &app.resources);

    assert_eq!(report.registered, vec!["auth"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "broken");
    assert!(!report.is_complete());

    // The surviving group still answers; the broken prefix matches nothing
    let (status, _) = common::request(&router, Method::GET, "/api/auth/me", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = common::request(&router, Method::GET, "/api/broken/ping", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
