// ABOUTME: Centralized resource container for dependency injection in the Meal Mind server
// ABOUTME: Manages shared resources like the database handle, auth manager, and config
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Server Resources Module
//!
//! Centralized resource container for dependency injection. Every route
//! handler receives the same `Arc<ServerResources>` through axum state,
//! so expensive objects are built exactly once at startup.

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database_plugins::factory::Database;
use std::sync::Arc;

/// Centralized resource container for dependency injection
///
/// This struct holds all shared server resources to eliminate the
/// anti-pattern of recreating expensive objects like `AuthManager`
/// and excessive Arc cloning.
#[derive(Clone)]
pub struct ServerResources {
    pub database: Arc<Database>,
    pub auth_manager: Arc<AuthManager>,
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: Arc<ServerConfig>) -> Self {
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            config,
        }
    }
}
