// ABOUTME: Route module organization for Meal Mind HTTP endpoints
// ABOUTME: Provides a declarative route group table processed by one registration combinator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Meal Mind server
//!
//! This module organizes all HTTP routes by domain. Each domain module
//! contains only route definitions and thin handler functions. Groups are
//! declared in [`ROUTE_GROUPS`] and mounted by [`register_route_groups`],
//! which records per-group failures instead of aborting the whole app.

use crate::resources::ServerResources;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tracing::{error, info};

/// Activity catalog routes
pub mod activities;
/// Authentication and account routes
pub mod auth;
/// Profile setup and update routes
pub mod profile;
/// Weight progress routes
pub mod progress;
/// Daily recommendation and check-in routes
pub mod recommendations;
/// Dashboard and account management routes
pub mod user;

pub use activities::ActivityRoutes;
pub use auth::AuthRoutes;
pub use profile::ProfileRoutes;
pub use progress::ProgressRoutes;
pub use recommendations::RecommendationRoutes;
pub use user::UserRoutes;

/// One mountable group of routes
#[derive(Clone, Copy)]
pub struct RouteGroup {
    /// Stable name used in logs and the registration report
    pub name: &'static str,
    /// Path prefix the group's router is nested under
    pub prefix: &'static str,
    /// Builds the group router from shared resources
    pub build: fn(Arc<ServerResources>) -> Result<Router>,
}

/// Every route group the application serves, in mount order
pub const ROUTE_GROUPS: &[RouteGroup] = &[
    RouteGroup {
        name: "auth",
        prefix: "/api/auth",
        build: AuthRoutes::router,
    },
    RouteGroup {
        name: "profile",
        prefix: "/api/profile",
        build: ProfileRoutes::router,
    },
    RouteGroup {
        name: "recommendations",
        prefix: "/api/recommendations",
        build: RecommendationRoutes::router,
    },
    RouteGroup {
        name: "activities",
        prefix: "/api/activities",
        build: ActivityRoutes::router,
    },
    RouteGroup {
        name: "user",
        prefix: "/api/user",
        build: UserRoutes::router,
    },
    RouteGroup {
        name: "progress",
        prefix: "/api/progress",
        build: ProgressRoutes::router,
    },
];

/// Outcome of mounting a route group table
#[derive(Debug, Clone, Default)]
pub struct RegistrationReport {
    /// Names of groups that mounted successfully
    pub registered: Vec<&'static str>,
    /// Names and rendered errors of groups that failed to build
    pub failed: Vec<(&'static str, String)>,
}

impl RegistrationReport {
    /// Whether every group in the table was mounted
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Attempt to build and nest every group, recording failures
///
/// A group that fails to build is logged and listed in the report; the
/// remaining groups still mount.
pub fn register_route_groups(
    groups: &[RouteGroup],
    resources: &Arc<ServerResources>,
) -> (Router, RegistrationReport) {
    let mut app = Router::new();
    let mut report = RegistrationReport::default();

    for group in groups {
        match (group.build)(resources.clone()) {
            Ok(router) => {
                info!("Registered route group '{}' at {}", group.name, group.prefix);
                app = app.nest(group.prefix, router);
                report.registered.push(group.name);
            }
            Err(e) => {
                error!(
                    "Failed to register route group '{}' at {}: {e:#}",
                    group.name, group.prefix
                );
                report.failed.push((group.name, format!("{e:#}")));
            }
        }
    }

    (app, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broken(_resources: Arc<ServerResources>) -> Result<Router> {
        anyhow::bail!("router construction failed")
    }

    fn working(_resources: Arc<ServerResources>) -> Result<Router> {
        Ok(Router::new().route("/ping", axum::routing::get(|| async { "ok" })))
    }

    #[tokio::test]
    async fn report_separates_registered_from_failed() {
        let resources = crate::test_utils::test_resources().await;
        let groups = [
            RouteGroup {
                name: "good",
                prefix: "/api/good",
                build: working,
            },
            RouteGroup {
                name: "bad",
                prefix: "/api/bad",
                build: broken,
            },
        ];

        let (_, report) = register_route_groups(&groups, &resources);

        assert_eq!(report.registered, vec!["good"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "bad");
        assert!(!report.is_complete());
    }

    #[tokio::test]
    async fn full_table_registers_cleanly() {
        let resources = crate::test_utils::test_resources().await;
        let (_, report) = register_route_groups(ROUTE_GROUPS, &resources);

        assert!(report.is_complete());
        assert_eq!(report.registered.len(), ROUTE_GROUPS.len());
    }
}
