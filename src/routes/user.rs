// ABOUTME: User account route handlers for dashboard aggregation and account management
// ABOUTME: Provides REST endpoints for the dashboard view, password changes, and account deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! User account routes
//!
//! This module aggregates the dashboard view and handles account-level
//! operations. All handlers require valid JWT authentication.

use super::auth::UserInfo;
use crate::{
    auth::AuthResult,
    constants::limits,
    database_plugins::DatabaseProvider,
    errors::AppError,
    logging::AppLogger,
    models::{DailyCheckin, DailyRecommendation, UserProfile},
    resources::ServerResources,
};
use anyhow::Result;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Password change request
#[derive(Debug, Deserialize)]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Aggregated dashboard view for the authenticated user
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub user: UserInfo,
    pub profile: Option<UserProfile>,
    pub today_recommendation: Option<DailyRecommendation>,
    pub today_checkin: Option<DailyCheckin>,
}

/// Simple confirmation message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// User account route handlers
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user account routes
    ///
    /// # Errors
    ///
    /// Infallible today; the signature matches the route group table.
    pub fn router(resources: Arc<ServerResources>) -> Result<Router> {
        Ok(Router::new()
            .route("/dashboard", get(Self::handle_dashboard))
            .route("/password", put(Self::handle_password_change))
            .route("/account", delete(Self::handle_account_delete))
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

    /// Handle the aggregated dashboard view
    async fn handle_dashboard(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        let database = &resources.database;

        let user = database
            .get_user(auth.user_id)
            .await
            .map_err(|e| AppError::internal(format!("Database error loading user: {e}")))?
            .ok_or_else(|| AppError::not_found("User"))?;

        let profile = database
            .get_user_profile(auth.user_id)
            .await
            .map_err(|e| AppError::internal(format!("Database error loading profile: {e}")))?;

        let today = Utc::now().date_naive();
        let today_recommendation = database
            .get_daily_recommendation(auth.user_id, today)
            .await
            .map_err(|e| {
                AppError::internal(format!("Database error loading recommendation: {e}"))
            })?;
        let today_checkin = database
            .get_daily_checkin(auth.user_id, today)
            .await
            .map_err(|e| AppError::internal(format!("Database error loading check-in: {e}")))?;

        Ok((
            StatusCode::OK,
            Json(DashboardResponse {
                user: UserInfo::from(&user),
                profile,
                today_recommendation,
                today_checkin,
            }),
        )
            .into_response())
    }

    /// Handle password change with current-password verification
    async fn handle_password_change(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<PasswordChangeRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        if request.new_password.len() < limits::MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {} characters",
                limits::MIN_PASSWORD_LENGTH
            )));
        }

        let user = resources
            .database
            .get_user(auth.user_id)
            .await
            .map_err(|e| AppError::internal(format!("Database error loading user: {e}")))?
            .ok_or_else(|| AppError::not_found("User"))?;

        // bcrypt verification is CPU-bound, keep it off the async workers
        let current = request.current_password;
        let password_hash = user.password_hash.clone();
        let is_valid = tokio::task::spawn_blocking(move || bcrypt::verify(&current, &password_hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            AppLogger::log_auth_event(
                &auth.user_id.to_string(),
                "password_change",
                false,
                Some("current password mismatch"),
            );
            return Err(AppError::auth_invalid("Current password is incorrect"));
        }

        let new_hash = bcrypt::hash(&request.new_password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
        resources
            .database
            .update_password(auth.user_id, &new_hash)
            .await
            .map_err(|e| AppError::internal(format!("Failed to update password: {e}")))?;

        AppLogger::log_auth_event(&auth.user_id.to_string(), "password_change", true, None);
        Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "Password updated".to_owned(),
            }),
        )
            .into_response())
    }

    /// Handle account deletion with cascade
    async fn handle_account_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        resources
            .database
            .delete_user(auth.user_id)
            .await
            .map_err(|e| AppError::internal(format!("Failed to delete account: {e}")))?;

        AppLogger::log_auth_event(&auth.user_id.to_string(), "account_delete", true, None);
        info!("Account {} deleted", auth.user_id);
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
