// ABOUTME: Test utilities for creating users, profiles, and server resources in a consistent way
// ABOUTME: Centralizes test data creation to avoid duplication and ensure consistency across tests
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::auth::AuthManager;
use crate::config::{EnvSettings, ServerConfig};
use crate::database_plugins::factory::Database;
use crate::database_plugins::DatabaseProvider;
use crate::models::{ActivityType, FoodItem, Intensity, MealSlot, User, UserProfile};
use crate::resources::ServerResources;
use std::sync::Arc;
use uuid::Uuid;

/// Create a test user with default values
#[must_use]
pub fn create_test_user(email: &str, username: &str) -> User {
    User::new(
        email.to_owned(),
        username.to_owned(),
        "test_password_hash".to_owned(),
    )
}

/// Create a test profile for a user with sensible defaults
#[must_use]
pub fn create_test_profile(user_id: Uuid) -> UserProfile {
    let mut profile = UserProfile::new(
        user_id,
        70.0,
        175.0,
        25,
        "male".to_owned(),
        "moderate".to_owned(),
    );
    profile.target_weight_kg = Some(65.0);
    profile
}

/// Create a test food item assigned to a meal slot
#[must_use]
pub fn create_test_food(name: &str, calories: f64, slot: MealSlot) -> FoodItem {
    FoodItem {
        id: 0,
        name: name.to_owned(),
        calories,
        protein_g: 12.0,
        carbs_g: 30.0,
        fat_g: 8.0,
        category: slot,
        serving: "1 serving".to_owned(),
        vegetarian: false,
    }
}

/// Create a test activity type
#[must_use]
pub fn create_test_activity(name: &str, calories_per_hour: f64) -> ActivityType {
    ActivityType {
        id: 0,
        name: name.to_owned(),
        calories_per_hour,
        category: "cardio".to_owned(),
        intensity: Intensity::Moderate,
    }
}

/// Resolve the testing configuration profile
///
/// # Panics
///
/// Panics if the built-in testing profile fails to resolve.
#[must_use]
pub fn test_config() -> ServerConfig {
    ServerConfig::resolve(Some("testing"), &EnvSettings::default())
        .expect("testing profile should always resolve")
}

/// Build server resources over a fresh in-memory database
///
/// # Panics
///
/// Panics if the in-memory database cannot be created.
pub async fn test_resources() -> Arc<ServerResources> {
    let config = test_config();
    let database = Database::new(&config.database.url.to_connection_string(), None)
        .await
        .expect("in-memory database should initialize");
    let auth_manager = AuthManager::new(
        config.auth.jwt_secret.as_bytes(),
        config.auth.token_expiry,
    );

    Arc::new(ServerResources::new(
        database,
        auth_manager,
        Arc::new(config),
    ))
}

/// Build server resources and insert one user, returning a valid token
///
/// # Panics
///
/// Panics if resource construction or user insertion fails.
pub async fn test_resources_with_user(
    email: &str,
    username: &str,
) -> (Arc<ServerResources>, User, String) {
    let resources = test_resources().await;
    let user = create_test_user(email, username);
    resources
        .database
        .create_user(&user)
        .await
        .expect("user insert should succeed");
    let token = resources
        .auth_manager
        .generate_token(&user)
        .expect("token generation should succeed");
    (resources, user, token)
}
