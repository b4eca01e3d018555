// ABOUTME: Startup sequence driving directory provisioning, schema creation, and seeding
// ABOUTME: Shared by the server and seeder binaries so both converge on the same state
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Startup Sequence
//!
//! Orders the three cold-start states: provisioning (database directories
//! exist), schema-ready (idempotent table creation), and seeded-or-skipped
//! (demo accounts and starter catalogs on an empty database). Seeding
//! errors abort startup; route-group failures do not.

use crate::{
    config::{DatabaseUrl, Environment, EnvSettings, ServerConfig},
    database_plugins::DatabaseProvider,
    seed::{self, SeedOutcome},
    server::bootstrap::{self, BootstrappedApp},
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Result of a full startup pass
pub struct StartupOutcome {
    /// The bootstrapped application, ready to serve
    pub app: BootstrappedApp,
    /// Whether demo data was inserted or already present
    pub seed: SeedOutcome,
}

/// Create the parent directory of a file-backed SQLite database
///
/// SQLite creates the database file on first connection but not its
/// directory. No-op for in-memory and PostgreSQL URLs.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub fn ensure_database_directories(config: &ServerConfig) -> Result<()> {
    if let DatabaseUrl::SQLite { path } = &config.database.url {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
                info!("Database directory ready: {}", parent.display());
            }
        }
    }
    Ok(())
}

/// Run the full startup sequence for the given profile
///
/// # Errors
///
/// Returns an error if configuration, provisioning, schema creation, or
/// seeding fails.
pub async fn run(profile: Option<Environment>) -> Result<StartupOutcome> {
    let config = match profile {
        Some(environment) => {
            ServerConfig::resolve(Some(&environment.to_string()), &EnvSettings::from_env())?
        }
        None => ServerConfig::from_env()?,
    };
    run_with_config(Arc::new(config)).await
}

/// Run the full startup sequence from an already resolved configuration
///
/// # Errors
///
/// Returns an error if provisioning, schema creation, or seeding fails.
pub async fn run_with_config(config: Arc<ServerConfig>) -> Result<StartupOutcome> {
    ensure_database_directories(&config)?;

    let app = bootstrap::create_app_with_config(config).await?;
    app.resources
        .database
        .migrate()
        .await
        .context("Schema creation failed")?;

    let seed = seed::seed_all(app.resources.database.as_ref())
        .await
        .context("Demo data seeding failed")?;

    if app.report.is_complete() {
        info!(
            "Startup complete: {} route groups registered, seed {:?}",
            app.report.registered.len(),
            seed
        );
    } else {
        warn!(
            "Startup complete with degraded surface: {} registered, {} failed",
            app.report.registered.len(),
            app.report.failed.len()
        );
    }

    Ok(StartupOutcome { app, seed })
}

/// Serve the bootstrapped application until shutdown
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn serve(outcome: StartupOutcome) -> Result<()> {
    let port = outcome.app.resources.config.http_port;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind HTTP port {port}"))?;
    info!("HTTP server listening on http://0.0.0.0:{port}");

    axum::serve(listener, outcome.app.router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    info!("Shutdown signal received, stopping server");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_config;

    #[test]
    fn memory_urls_need_no_directories() {
        let config = test_config();
        assert!(config.database.url.is_memory());
        ensure_database_directories(&config).expect("no-op provisioning failed");
    }

    #[tokio::test]
    async fn startup_on_testing_profile_reaches_seeded_state() {
        let outcome = run_with_config(Arc::new(test_config()))
            .await
            .expect("startup failed");

        assert_eq!(outcome.seed, SeedOutcome::Seeded);
        assert!(outcome.app.report.is_complete());
        assert_eq!(
            outcome
                .app
                .resources
                .database
                .get_user_count()
                .await
                .expect("user count failed"),
            2
        );
    }

    #[tokio::test]
    async fn startup_twice_seeds_once() {
        // Two independent in-memory databases each seed themselves; the
        // skip path needs a shared database, covered by the seed tests.
        let first = run_with_config(Arc::new(test_config())).await.expect("startup failed");
        assert_eq!(first.seed, SeedOutcome::Seeded);

        let database = first.app.resources.database.as_ref();
        assert_eq!(
            seed::seed_all(database).await.expect("reseed failed"),
            SeedOutcome::Skipped
        );
    }
}
