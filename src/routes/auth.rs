// ABOUTME: User authentication route handlers for registration, login, and identity lookup
// ABOUTME: Provides REST endpoints for account creation and JWT-based session management
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Authentication routes for user management
//!
//! This module handles user registration, login, and the authenticated
//! identity endpoint. All handlers are thin wrappers that delegate
//! validation and storage to the shared resources.

use crate::{
    auth::AuthResult,
    constants::{error_messages, limits},
    database_plugins::DatabaseProvider,
    errors::AppError,
    logging::AppLogger,
    models::User,
    resources::ServerResources,
};
use anyhow::Result;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User info embedded in authentication responses
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub username: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            username: user.username.clone(),
        }
    }
}

/// Response carrying a bearer token and the account it belongs to
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Response for the authenticated identity endpoint
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserInfo,
}

/// Authentication route handlers
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    ///
    /// # Errors
    ///
    /// Infallible today; the signature matches the route group table.
    pub fn router(resources: Arc<ServerResources>) -> Result<Router> {
        Ok(Router::new()
            .route("/signup", post(Self::handle_signup))
            .route("/login", post(Self::handle_login))
            .route("/me", get(Self::handle_me))
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

    fn validate_signup(request: &SignupRequest) -> Result<(), AppError> {
        if request.email.trim().is_empty() || !request.email.contains('@') {
            return Err(AppError::invalid_input("A valid email address is required"));
        }
        if request.username.trim().is_empty() {
            return Err(AppError::invalid_input("Username is required"));
        }
        if request.password.len() < limits::MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {} characters",
                limits::MIN_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }

    /// Handle user registration
    async fn handle_signup(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<SignupRequest>,
    ) -> Result<Response, AppError> {
        Self::validate_signup(&request)?;

        let database = &resources.database;
        if database
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AppError::internal(format!("Database error during signup: {e}")))?
            .is_some()
        {
            return Err(AppError::already_exists(error_messages::USER_ALREADY_EXISTS));
        }
        if database
            .get_user_by_username(&request.username)
            .await
            .map_err(|e| AppError::internal(format!("Database error during signup: {e}")))?
            .is_some()
        {
            return Err(AppError::already_exists(error_messages::USERNAME_TAKEN));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        let user = User::new(request.email, request.username, password_hash);
        database
            .create_user(&user)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create user: {e}")))?;

        let token = resources.auth_manager.generate_token(&user)?;
        AppLogger::log_auth_event(&user.id.to_string(), "signup", true, None);
        info!("New user registered: {}", user.email);

        Ok((
            StatusCode::CREATED,
            Json(AuthResponse {
                token,
                user: UserInfo::from(&user),
            }),
        )
            .into_response())
    }

    /// Handle user login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let user = resources
            .database
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AppError::internal(format!("Database error during login: {e}")))?
            .ok_or_else(|| AppError::auth_invalid(error_messages::INVALID_CREDENTIALS))?;

        // bcrypt verification is CPU-bound, keep it off the async workers
        let password = request.password;
        let password_hash = user.password_hash.clone();
        let is_valid = tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid || !user.is_active {
            AppLogger::log_auth_event(
                &user.id.to_string(),
                "login",
                false,
                Some("invalid password or inactive account"),
            );
            return Err(AppError::auth_invalid(error_messages::INVALID_CREDENTIALS));
        }

        resources
            .database
            .update_last_active(user.id)
            .await
            .map_err(|e| AppError::internal(format!("Failed to update last active: {e}")))?;

        let token = resources.auth_manager.generate_token(&user)?;
        AppLogger::log_auth_event(&user.id.to_string(), "login", true, None);

        Ok((
            StatusCode::OK,
            Json(AuthResponse {
                token,
                user: UserInfo::from(&user),
            }),
        )
            .into_response())
    }

    /// Handle the authenticated identity lookup
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let user = resources
            .database
            .get_user(auth.user_id)
            .await
            .map_err(|e| AppError::internal(format!("Database error loading user: {e}")))?
            .ok_or_else(|| AppError::not_found("User"))?;

        Ok((
            StatusCode::OK,
            Json(MeResponse {
                user: UserInfo::from(&user),
            }),
        )
            .into_response())
    }
}
