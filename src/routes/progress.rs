// ABOUTME: Progress tracking route handlers for weight history and summary statistics
// ABOUTME: Provides REST endpoints that derive trends from the daily check-in series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Progress routes
//!
//! Weight history and summary endpoints built from the check-in series.
//! All handlers require valid JWT authentication.

use crate::{
    auth::AuthResult,
    database_plugins::DatabaseProvider,
    errors::AppError,
    models::DailyCheckin,
    resources::ServerResources,
};
use anyhow::Result;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

/// One weight measurement on the progress chart
#[derive(Debug, Serialize)]
pub struct WeightPoint {
    pub date: NaiveDate,
    pub weight_kg: f64,
}

/// Weight history response, oldest first
#[derive(Debug, Serialize)]
pub struct WeightHistoryResponse {
    pub weights: Vec<WeightPoint>,
    pub count: usize,
}

/// Progress summary derived from check-ins and the stored profile
#[derive(Debug, Serialize)]
pub struct ProgressSummaryResponse {
    pub starting_weight_kg: f64,
    pub current_weight_kg: f64,
    pub target_weight_kg: Option<f64>,
    pub change_kg: f64,
    pub checkin_count: usize,
}

/// Progress route handlers
pub struct ProgressRoutes;

impl ProgressRoutes {
    /// Create all progress routes
    ///
    /// # Errors
    ///
    /// Infallible today; the signature matches the route group table.
    pub fn router(resources: Arc<ServerResources>) -> Result<Router> {
        Ok(Router::new()
            .route("/weight", get(Self::handle_weight_history))
            .route("/summary", get(Self::handle_summary))
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

    /// Check-ins that carry a weight measurement, as chart points
    fn weight_points(checkins: &[DailyCheckin]) -> Vec<WeightPoint> {
        checkins
            .iter()
            .filter_map(|checkin| {
                checkin.weight_kg.map(|weight_kg| WeightPoint {
                    date: checkin.date,
                    weight_kg,
                })
            })
            .collect()
    }

    /// Handle the weight history series
    async fn handle_weight_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let checkins = resources
            .database
            .list_daily_checkins(auth.user_id)
            .await
            .map_err(|e| AppError::internal(format!("Database error loading check-ins: {e}")))?;

        let weights = Self::weight_points(&checkins);
        let count = weights.len();
        Ok((StatusCode::OK, Json(WeightHistoryResponse { weights, count })).into_response())
    }

    /// Handle the progress summary
    async fn handle_summary(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let profile = resources
            .database
            .get_user_profile(auth.user_id)
            .await
            .map_err(|e| AppError::internal(format!("Database error loading profile: {e}")))?
            .ok_or_else(|| AppError::not_found("Profile"))?;

        let checkins = resources
            .database
            .list_daily_checkins(auth.user_id)
            .await
            .map_err(|e| AppError::internal(format!("Database error loading check-ins: {e}")))?;

        let weights = Self::weight_points(&checkins);
        let starting_weight_kg = weights.first().map_or(profile.weight_kg, |p| p.weight_kg);
        let current_weight_kg = weights.last().map_or(profile.weight_kg, |p| p.weight_kg);

        Ok((
            StatusCode::OK,
            Json(ProgressSummaryResponse {
                starting_weight_kg,
                current_weight_kg,
                target_weight_kg: profile.target_weight_kg,
                change_kg: current_weight_kg - starting_weight_kg,
                checkin_count: checkins.len(),
            }),
        )
            .into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_profile;
    use uuid::Uuid;

    fn checkin(date: &str, weight_kg: Option<f64>) -> DailyCheckin {
        DailyCheckin {
            id: 0,
            user_id: Uuid::new_v4(),
            date: date.parse().unwrap(),
            weight_kg,
            meals_followed: true,
            workout_completed: false,
            notes: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn weight_points_skip_checkins_without_weight() {
        let checkins = vec![
            checkin("2025-03-01", Some(80.0)),
            checkin("2025-03-02", None),
            checkin("2025-03-03", Some(79.4)),
        ];

        let points = ProgressRoutes::weight_points(&checkins);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].weight_kg, 80.0);
        assert_eq!(points[1].weight_kg, 79.4);
    }

    #[test]
    fn profile_weight_backs_empty_series() {
        let profile = create_test_profile(Uuid::new_v4());
        let weights = ProgressRoutes::weight_points(&[]);
        let starting = weights.first().map_or(profile.weight_kg, |p| p.weight_kg);
        let current = weights.last().map_or(profile.weight_kg, |p| p.weight_kg);

        assert_eq!(starting, profile.weight_kg);
        assert_eq!(current, profile.weight_kg);
    }
}
