// ABOUTME: Activity catalog route handlers for browsing and extending workout options
// ABOUTME: Provides REST endpoints for listing, searching, and adding activity types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Activity catalog routes
//!
//! This module exposes the activity catalog the workout planner draws
//! from. All handlers require valid JWT authentication.

use crate::{
    auth::AuthResult,
    database_plugins::DatabaseProvider,
    errors::AppError,
    models::{ActivityType, Intensity},
    resources::ServerResources,
};
use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Query parameters for activity search
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// New catalog entry request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivityRequest {
    pub name: String,
    pub calories_per_hour: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub intensity: Option<String>,
}

/// Activity catalog listing response
#[derive(Debug, Serialize)]
pub struct ActivityListResponse {
    pub activities: Vec<ActivityType>,
    pub count: usize,
}

/// Activity catalog route handlers
pub struct ActivityRoutes;

impl ActivityRoutes {
    /// Create all activity catalog routes
    ///
    /// # Errors
    ///
    /// Infallible today; the signature matches the route group table.
    pub fn router(resources: Arc<ServerResources>) -> Result<Router> {
        Ok(Router::new()
            .route("/", get(Self::handle_list).post(Self::handle_create))
            .route("/search", get(Self::handle_search))
            .with_state(resources))
    }

    /// Extract and authenticate the bearer token from request headers
    fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthResult, AppError> {
        let auth_header = headers.get("authorization").and_then(|h| h.to_str().ok());
        resources.auth_manager.authenticate(auth_header)
    }

    /// Handle catalog listing
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;

        let activities = resources
            .database
            .list_activity_types()
            .await
            .map_err(|e| AppError::internal(format!("Database error loading activities: {e}")))?;

        let count = activities.len();
        Ok((
            StatusCode::OK,
            Json(ActivityListResponse { activities, count }),
        )
            .into_response())
    }

    /// Handle case-insensitive name search
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<SearchQuery>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;

        let term = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AppError::invalid_input("Query parameter 'q' is required"))?;

        let activities = resources
            .database
            .search_activity_types(term)
            .await
            .map_err(|e| AppError::internal(format!("Database error searching activities: {e}")))?;

        let count = activities.len();
        Ok((
            StatusCode::OK,
            Json(ActivityListResponse { activities, count }),
        )
            .into_response())
    }

    /// Handle catalog extension
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CreateActivityRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("Activity name is required"));
        }
        if request.calories_per_hour <= 0.0 {
            return Err(AppError::invalid_input(
                "calories_per_hour must be positive",
            ));
        }

        let mut activity = ActivityType {
            id: 0,
            name: name.to_owned(),
            calories_per_hour: request.calories_per_hour,
            category: request
                .category
                .unwrap_or_else(|| "general".to_owned()),
            intensity: Intensity::from_str_or_default(
                request.intensity.as_deref().unwrap_or("moderate"),
            ),
        };

        let id = resources
            .database
            .insert_activity_type(&activity)
            .await
            .map_err(|e| AppError::internal(format!("Failed to store activity: {e}")))?;
        activity.id = id;

        info!("Activity '{}' added to catalog by user {}", activity.name, auth.user_id);
        Ok((StatusCode::CREATED, Json(activity)).into_response())
    }
}
