// ABOUTME: Daily recommendation route handlers for meal plans, workouts, and check-ins
// ABOUTME: Provides REST endpoints for plan retrieval, slot regeneration, and adherence tracking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Daily recommendation routes
//!
//! This module serves the computed daily plan: targets, meals, and the
//! suggested workout. Plans are stored per (user, date); the same day
//! always returns the same stored plan unless a slot is regenerated.
//! All handlers require valid JWT authentication.

use crate::{
    auth::AuthResult,
    constants::limits,
    database_plugins::DatabaseProvider,
    errors::AppError,
    models::{DailyCheckin, DailyRecommendation, MealSlot, UserProfile},
    recommendation::RecommendationEngine,
    resources::ServerResources,
};
use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Daily check-in request; `date` defaults to today
#[derive(Debug, Clone, Deserialize)]
pub struct CheckinRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub meals_followed: bool,
    #[serde(default)]
    pub workout_completed: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query parameters for the history endpoint
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Recommendation history response, newest first
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub recommendations: Vec<DailyRecommendation>,
    pub count: usize,
}

/// Recommendation route handlers
pub struct RecommendationRoutes;

impl RecommendationRoutes {
    /// Create all recommendation routes
    ///
    /// # Errors
    ///
    /// Infallible today; the signature matches the route group table.
    pub fn router(resources: Arc<ServerResources>) -> Result<Router> {
        Ok(Router::new()
            .route("/today", get(Self::handle_today))
            .route("/regenerate/:meal", post(Self::handle_regenerate))
            .route("/checkin", post(Self::handle_checkin))
            .route("/history", get(Self::handle_history))
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

    /// Recommendations cannot be computed without body metrics
    async fn require_profile(
        resources: &Arc<ServerResources>,
        user_id: uuid::Uuid,
    ) -> Result<UserProfile, AppError> {
        resources
            .database
            .get_user_profile(user_id)
            .await
            .map_err(|e| AppError::internal(format!("Database error loading profile: {e}")))?
            .ok_or_else(|| {
                AppError::invalid_input("Profile setup is required before recommendations")
            })
    }

    /// Return the stored plan for the date, generating and storing one if
    /// none exists yet
    async fn load_or_generate(
        resources: &Arc<ServerResources>,
        profile: &UserProfile,
        date: NaiveDate,
    ) -> Result<DailyRecommendation, AppError> {
        let existing = resources
            .database
            .get_daily_recommendation(profile.user_id, date)
            .await
            .map_err(|e| {
                AppError::internal(format!("Database error loading recommendation: {e}"))
            })?;
        if let Some(recommendation) = existing {
            return Ok(recommendation);
        }

        let engine = RecommendationEngine::new(resources.database.clone());
        let mut recommendation = engine
            .generate_daily(profile, date)
            .await
            .map_err(|e| AppError::internal(format!("Failed to generate recommendation: {e}")))?;
        let id = resources
            .database
            .upsert_daily_recommendation(&recommendation)
            .await
            .map_err(|e| AppError::internal(format!("Failed to store recommendation: {e}")))?;
        recommendation.id = id;

        info!(
            "Generated daily recommendation for user {} on {date}",
            profile.user_id
        );
        Ok(recommendation)
    }

    /// Handle today's plan retrieval
    async fn handle_today(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        let profile = Self::require_profile(&resources, auth.user_id).await?;

        let today = Utc::now().date_naive();
        let recommendation = Self::load_or_generate(&resources, &profile, today).await?;

        Ok((StatusCode::OK, Json(recommendation)).into_response())
    }

    /// Handle regeneration of a single meal slot
    async fn handle_regenerate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(meal): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        let slot = meal.parse::<MealSlot>()?;
        let profile = Self::require_profile(&resources, auth.user_id).await?;

        let today = Utc::now().date_naive();
        let mut recommendation = Self::load_or_generate(&resources, &profile, today).await?;

        let engine = RecommendationEngine::new(resources.database.clone());
        engine
            .regenerate_slot(&mut recommendation, &profile, slot)
            .await
            .map_err(|e| AppError::internal(format!("Failed to regenerate meal slot: {e}")))?;

        resources
            .database
            .update_recommendation_meals(recommendation.id, &recommendation.meal_plan)
            .await
            .map_err(|e| AppError::internal(format!("Failed to store regenerated meals: {e}")))?;

        info!("Regenerated {slot} for user {}", auth.user_id);
        Ok((StatusCode::OK, Json(recommendation)).into_response())
    }

    /// Handle daily check-in upsert
    async fn handle_checkin(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CheckinRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        if let Some(weight_kg) = request.weight_kg {
            if !(limits::MIN_WEIGHT_KG..=limits::MAX_WEIGHT_KG).contains(&weight_kg) {
                return Err(AppError::invalid_input(format!(
                    "Weight must be between {} and {} kg",
                    limits::MIN_WEIGHT_KG,
                    limits::MAX_WEIGHT_KG
                )));
            }
        }

        let mut checkin = DailyCheckin {
            id: 0,
            user_id: auth.user_id,
            date: request.date.unwrap_or_else(|| Utc::now().date_naive()),
            weight_kg: request.weight_kg,
            meals_followed: request.meals_followed,
            workout_completed: request.workout_completed,
            notes: request.notes.and_then(|s| {
                let trimmed = s.trim().to_owned();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                }
            }),
            created_at: Utc::now(),
        };

        let id = resources
            .database
            .upsert_daily_checkin(&checkin)
            .await
            .map_err(|e| AppError::internal(format!("Failed to store check-in: {e}")))?;
        checkin.id = id;

        Ok((StatusCode::CREATED, Json(checkin)).into_response())
    }

    /// Handle recommendation history listing
    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<HistoryQuery>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let limit = query.limit.unwrap_or(limits::DEFAULT_HISTORY_LIMIT);
        if limit <= 0 {
            return Err(AppError::invalid_input("limit must be positive"));
        }
        let limit = limit.min(limits::MAX_HISTORY_LIMIT);

        let recommendations = resources
            .database
            .list_daily_recommendations(auth.user_id, limit)
            .await
            .map_err(|e| AppError::internal(format!("Database error loading history: {e}")))?;

        let count = recommendations.len();
        Ok((
            StatusCode::OK,
            Json(HistoryResponse {
                recommendations,
                count,
            }),
        )
            .into_response())
    }
}
