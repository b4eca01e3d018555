// ABOUTME: Main library entry point for the Meal Mind backend
// ABOUTME: Provides the REST API, recommendation engine, and database layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - recursion_limit: Increased from default 128 to 256 for complex derive macros
//   (serde, thiserror) on deeply nested types
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![recursion_limit = "256"]
#![deny(unsafe_code)]

//! # Meal Mind Server
//!
//! An adaptive meal planning and activity tracking backend. The server
//! derives daily calorie and macro targets from a user's profile, builds
//! deterministic meal and workout plans from seeded catalogs, and tracks
//! progress through daily check-ins.
//!
//! ## Features
//!
//! - **JWT authentication**: signup, login, and bearer-token sessions
//! - **Profile-driven targets**: Mifflin-St Jeor calorie and macro math
//! - **Daily recommendations**: one stored plan per user per day, with
//!   per-meal regeneration
//! - **Progress tracking**: weight series and summaries from check-ins
//! - **Pluggable storage**: SQLite by default, PostgreSQL behind a feature
//!
//! ## Quick Start
//!
//! 1. Seed a database with the `mealmind-seed` binary
//! 2. Start the API with `mealmind-server`
//! 3. Sign in with the demo accounts and call `/api/recommendations/today`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mealmind_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     // Load configuration
//!     let config = ServerConfig::from_env()?;
//!
//!     println!("Meal Mind server configured with port: HTTP={}",
//!              config.http_port);
//!
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by binary crates (src/bin/) and integration tests (tests/).
// They must remain `pub` so external consumers can access them.

/// Authentication and session management
pub mod auth;

/// Configuration management and deployment profiles
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Database abstraction layer with plugin support
pub mod database_plugins;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// Common data models for users, catalogs, and daily plans
pub mod models;

/// Calorie targets and deterministic meal/workout planning
pub mod recommendation;

/// Centralized resource container for dependency injection
pub mod resources;

/// `HTTP` route groups for the REST API
pub mod routes;

/// Demo account and starter catalog seeding
pub mod seed;

/// Server bootstrap, startup sequence, and static file surface
pub mod server;

/// Test utilities for creating consistent test data
#[cfg(any(test, feature = "testing"))]
pub mod test_utils;
