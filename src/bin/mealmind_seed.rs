// ABOUTME: Standalone seeder binary for demo accounts and starter catalogs
// ABOUTME: Provisions directories, creates the schema, and seeds an empty database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Standalone database seeder.
//!
//! Runs the same provisioning, schema, and seed steps as server startup
//! without serving HTTP. Useful for preparing a database ahead of a
//! deployment or resetting a development fixture.
//!
//! Usage:
//! ```bash
//! # Seed the development database
//! cargo run --bin mealmind-seed
//!
//! # Seed a specific profile
//! cargo run --bin mealmind-seed -- --env production
//! ```

use anyhow::Result;
use clap::Parser;
use mealmind_server::{
    config::{Environment, EnvSettings, ServerConfig},
    database_plugins::{factory::Database, DatabaseProvider},
    logging,
    seed::{self, SeedOutcome},
    server::startup,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "mealmind-seed")]
#[command(about = "Meal Mind demo data seeder")]
struct Args {
    /// Deployment profile (development, testing, production, railway)
    #[arg(long)]
    env: Option<String>,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    let profile = args
        .env
        .as_deref()
        .map(str::parse::<Environment>)
        .transpose()?;
    let config = match profile {
        Some(environment) => {
            ServerConfig::resolve(Some(&environment.to_string()), &EnvSettings::from_env())?
        }
        None => ServerConfig::from_env()?,
    };

    let database_url = args
        .database_url
        .unwrap_or_else(|| config.database.url.to_connection_string());
    info!("Seeding database for {} profile", config.environment);

    startup::ensure_database_directories(&config)?;
    let database = Database::new(&database_url, config.database.pool).await?;
    database.migrate().await?;

    match seed::seed_all(&database).await? {
        SeedOutcome::Seeded => info!("Demo accounts and starter catalogs seeded"),
        SeedOutcome::Skipped => info!("Database already populated, nothing to do"),
    }

    info!(
        "Database ready: {} users, {} foods",
        database.get_user_count().await?,
        database.get_food_item_count().await?
    );
    Ok(())
}
