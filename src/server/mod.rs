// ABOUTME: HTTP server composition for the Meal Mind backend
// ABOUTME: Bootstraps configuration, database, routes, and the startup sequence
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

pub mod bootstrap;
pub mod startup;
pub mod static_files;

pub use bootstrap::{create_app, BootstrappedApp};
pub use startup::{ensure_database_directories, run, StartupOutcome};
