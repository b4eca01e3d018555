// ABOUTME: Production server binary for the Meal Mind backend
// ABOUTME: Drives the startup sequence and serves the HTTP API
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Meal Mind Server Binary
//!
//! Starts the Meal Mind HTTP API: resolves the deployment profile,
//! provisions the database, seeds demo data on first run, and serves
//! until shutdown.

use anyhow::Result;
use clap::Parser;
use mealmind_server::{
    config::{Environment, EnvSettings, ServerConfig},
    logging,
    server::startup,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "mealmind-server")]
#[command(about = "Meal Mind - adaptive meal planning and activity tracking API")]
pub struct Args {
    /// Deployment profile (development, testing, production, railway)
    #[arg(long)]
    env: Option<String>,

    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle container environments where clap may not work properly
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Argument parsing failed: {e}");
            eprintln!("Using environment-based configuration");
            Args {
                env: None,
                http_port: None,
            }
        }
    };

    logging::init_from_env()?;

    // An explicit profile flag is parsed strictly; a typo should fail fast
    // rather than silently run in development
    let profile = args
        .env
        .as_deref()
        .map(str::parse::<Environment>)
        .transpose()?;

    let mut config = match profile {
        Some(environment) => {
            ServerConfig::resolve(Some(&environment.to_string()), &EnvSettings::from_env())?
        }
        None => ServerConfig::from_env()?,
    };
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    info!("Starting Meal Mind API");
    info!("{}", config.summary());

    let outcome = startup::run_with_config(Arc::new(config)).await?;
    display_available_endpoints(&outcome.app.resources.config);
    info!("Ready to serve meal plans!");

    if let Err(e) = startup::serve(outcome).await {
        error!("Server error: {e}");
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints with their ports
fn display_available_endpoints(config: &ServerConfig) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());

    info!("=== Available API Endpoints ===");
    display_auth_endpoints(&host, config.http_port);
    display_profile_endpoints(&host, config.http_port);
    display_recommendation_endpoints(&host, config.http_port);
    display_activity_endpoints(&host, config.http_port);
    display_user_endpoints(&host, config.http_port);
    display_progress_endpoints(&host, config.http_port);
    display_surface_endpoints(&host, config.http_port);
    info!("=== End of Endpoint List ===");
}

#[allow(clippy::cognitive_complexity)]
fn display_auth_endpoints(host: &str, port: u16) {
    info!("Authentication:");
    info!("   Sign Up:          POST http://{host}:{port}/api/auth/signup");
    info!("   Log In:           POST http://{host}:{port}/api/auth/login");
    info!("   Current User:     GET  http://{host}:{port}/api/auth/me");
}

#[allow(clippy::cognitive_complexity)]
fn display_profile_endpoints(host: &str, port: u16) {
    info!("Profile:");
    info!("   Set Up Profile:   POST http://{host}:{port}/api/profile/setup");
    info!("   Get Profile:      GET  http://{host}:{port}/api/profile/get");
    info!("   Update Profile:   PUT  http://{host}:{port}/api/profile/update");
}

#[allow(clippy::cognitive_complexity)]
fn display_recommendation_endpoints(host: &str, port: u16) {
    info!("Recommendations:");
    info!("   Today's Plan:     GET  http://{host}:{port}/api/recommendations/today");
    info!("   Regenerate Meal:  POST http://{host}:{port}/api/recommendations/regenerate/{{meal}}");
    info!("   Daily Check-In:   POST http://{host}:{port}/api/recommendations/checkin");
    info!("   History:          GET  http://{host}:{port}/api/recommendations/history");
}

#[allow(clippy::cognitive_complexity)]
fn display_activity_endpoints(host: &str, port: u16) {
    info!("Activity Catalog:");
    info!("   List Activities:  GET  http://{host}:{port}/api/activities/");
    info!("   Search:           GET  http://{host}:{port}/api/activities/search?q={{name}}");
    info!("   Add Activity:     POST http://{host}:{port}/api/activities/");
}

#[allow(clippy::cognitive_complexity)]
fn display_user_endpoints(host: &str, port: u16) {
    info!("User Account:");
    info!("   Dashboard:        GET  http://{host}:{port}/api/user/dashboard");
    info!("   Change Password:  PUT  http://{host}:{port}/api/user/password");
    info!("   Delete Account:   DELETE http://{host}:{port}/api/user/account");
}

#[allow(clippy::cognitive_complexity)]
fn display_progress_endpoints(host: &str, port: u16) {
    info!("Progress:");
    info!("   Weight History:   GET  http://{host}:{port}/api/progress/weight");
    info!("   Summary:          GET  http://{host}:{port}/api/progress/summary");
}

#[allow(clippy::cognitive_complexity)]
fn display_surface_endpoints(host: &str, port: u16) {
    info!("Server Surface:");
    info!("   Liveness / Index: GET  http://{host}:{port}/");
    info!("   API Smoke Test:   GET  http://{host}:{port}/api/test");
    info!("   CORS Smoke Test:  GET  http://{host}:{port}/api/cors-test");
}
