// ABOUTME: Configuration management module for centralized server settings and parameters
// ABOUTME: Handles deployment profiles, database URLs, secrets, and runtime options
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for the Meal Mind server
//!
//! This module provides centralized configuration management:
//!
//! - **Environment**: deployment profiles resolved from environment variables
//!   into an immutable [`environment::ServerConfig`] record
//!
//! Environment variable access is confined to [`environment::EnvSettings`];
//! the rest of the crate receives resolved configuration records.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    AuthConfig, DatabaseConfig, DatabaseUrl, EnvSettings, Environment, LogLevel, PoolTuning,
    SecurityConfig, ServerConfig, TokenExpiry,
};
