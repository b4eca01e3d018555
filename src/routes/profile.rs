// ABOUTME: Profile route handlers for body metrics and dietary preferences
// ABOUTME: Provides REST endpoints for one-time setup, retrieval, and partial updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Profile routes
//!
//! This module handles the one-to-one user profile: body metrics,
//! activity level, and dietary preferences. All handlers require valid
//! JWT authentication.

use crate::{
    auth::AuthResult,
    constants::limits,
    database_plugins::DatabaseProvider,
    errors::AppError,
    models::UserProfile,
    resources::ServerResources,
};
use anyhow::Result;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Initial profile setup request
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSetupRequest {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: i64,
    pub gender: String,
    pub activity_level: String,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub target_weight_kg: Option<f64>,
}

/// Partial profile update request; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub activity_level: Option<String>,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub target_weight_kg: Option<f64>,
}

/// Profile route handlers
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    ///
    /// # Errors
    ///
    /// Infallible today; the signature matches the route group table.
    pub fn router(resources: Arc<ServerResources>) -> Result<Router> {
        Ok(Router::new()
            .route("/setup", post(Self::handle_setup))
            .route("/get", get(Self::handle_get))
            .route("/update", put(Self::handle_update))
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

    fn validate_metrics(weight_kg: f64, height_cm: f64, age: i64) -> Result<(), AppError> {
        if !(limits::MIN_WEIGHT_KG..=limits::MAX_WEIGHT_KG).contains(&weight_kg) {
            return Err(AppError::invalid_input(format!(
                "Weight must be between {} and {} kg",
                limits::MIN_WEIGHT_KG,
                limits::MAX_WEIGHT_KG
            )));
        }
        if !(limits::MIN_HEIGHT_CM..=limits::MAX_HEIGHT_CM).contains(&height_cm) {
            return Err(AppError::invalid_input(format!(
                "Height must be between {} and {} cm",
                limits::MIN_HEIGHT_CM,
                limits::MAX_HEIGHT_CM
            )));
        }
        if !(limits::MIN_AGE..=limits::MAX_AGE).contains(&age) {
            return Err(AppError::invalid_input(format!(
                "Age must be between {} and {}",
                limits::MIN_AGE,
                limits::MAX_AGE
            )));
        }
        Ok(())
    }

    fn validate_target_weight(target_weight_kg: Option<f64>) -> Result<(), AppError> {
        if let Some(target) = target_weight_kg {
            if !(limits::MIN_WEIGHT_KG..=limits::MAX_WEIGHT_KG).contains(&target) {
                return Err(AppError::invalid_input(format!(
                    "Target weight must be between {} and {} kg",
                    limits::MIN_WEIGHT_KG,
                    limits::MAX_WEIGHT_KG
                )));
            }
        }
        Ok(())
    }

    /// Empty strings clear the stored restriction
    fn normalize_restrictions(raw: Option<String>) -> Option<String> {
        raw.and_then(|s| {
            let trimmed = s.trim().to_owned();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        })
    }

    /// Handle initial profile creation
    async fn handle_setup(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<ProfileSetupRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        Self::validate_metrics(request.weight_kg, request.height_cm, request.age)?;
        Self::validate_target_weight(request.target_weight_kg)?;

        let existing = resources
            .database
            .get_user_profile(auth.user_id)
            .await
            .map_err(|e| AppError::internal(format!("Database error loading profile: {e}")))?;
        if existing.is_some() {
            return Err(AppError::already_exists("Profile already exists"));
        }

        let mut profile = UserProfile::new(
            auth.user_id,
            request.weight_kg,
            request.height_cm,
            request.age,
            request.gender,
            request.activity_level,
        );
        profile.dietary_restrictions = Self::normalize_restrictions(request.dietary_restrictions);
        profile.target_weight_kg = request.target_weight_kg;

        resources
            .database
            .upsert_user_profile(&profile)
            .await
            .map_err(|e| AppError::internal(format!("Failed to store profile: {e}")))?;

        info!("Profile created for user {}", auth.user_id);
        Ok((StatusCode::CREATED, Json(profile)).into_response())
    }

    /// Handle profile retrieval
    async fn handle_get(
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

        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle partial profile update
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<ProfileUpdateRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let mut profile = resources
            .database
            .get_user_profile(auth.user_id)
            .await
            .map_err(|e| AppError::internal(format!("Database error loading profile: {e}")))?
            .ok_or_else(|| AppError::not_found("Profile"))?;

        if let Some(weight_kg) = request.weight_kg {
            profile.weight_kg = weight_kg;
        }
        if let Some(height_cm) = request.height_cm {
            profile.height_cm = height_cm;
        }
        if let Some(age) = request.age {
            profile.age = age;
        }
        if let Some(gender) = request.gender {
            profile.gender = gender;
        }
        if let Some(activity_level) = request.activity_level {
            profile.activity_level = activity_level;
        }
        if request.dietary_restrictions.is_some() {
            profile.dietary_restrictions =
                Self::normalize_restrictions(request.dietary_restrictions);
        }
        if let Some(target_weight_kg) = request.target_weight_kg {
            profile.target_weight_kg = Some(target_weight_kg);
        }

        Self::validate_metrics(profile.weight_kg, profile.height_cm, profile.age)?;
        Self::validate_target_weight(profile.target_weight_kg)?;
        profile.updated_at = Utc::now();

        resources
            .database
            .upsert_user_profile(&profile)
            .await
            .map_err(|e| AppError::internal(format!("Failed to store profile: {e}")))?;

        Ok((StatusCode::OK, Json(profile)).into_response())
    }
}
