// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Groups application constants into logical domains instead of scattering literals

//! Constants module
//!
//! This module organizes application constants by domain for better maintainability.
//! Environment variables are never read here; resolution happens in the config layer.

/// Service names
pub mod service_names {
    /// Meal Mind backend service name
    pub const MEAL_MIND_SERVER: &str = "mealmind_server";
    /// Seeding utility service name
    pub const MEAL_MIND_SEED: &str = "mealmind_seed";
}

/// Default values used when the environment leaves a knob unset
pub mod defaults {
    /// Development database file, relative to the working directory
    pub const DEV_DATABASE_FILE: &str = "instance/mealmind_dev.db";
    /// Production fallback database file
    pub const PROD_DATABASE_FILE: &str = "/tmp/mealmind.db";
    /// Development signing secret. Rejected outright in production.
    pub const DEV_SECRET_KEY: &str = "dev-secret-key-meal-mind";
    /// Development JWT secret. Rejected outright in production.
    pub const DEV_JWT_SECRET: &str = "jwt-secret-key";
    /// HTTP port when `PORT` is unset
    pub const HTTP_PORT: u16 = 5000;
    /// Access token lifetime in production profiles
    pub const TOKEN_EXPIRY_SECS: u64 = 3600;
}

/// Connection pool tuning
pub mod pooling {
    /// Production base pool size
    pub const PROD_POOL_SIZE: u32 = 10;
    /// Production overflow connections beyond the base pool
    pub const PROD_MAX_OVERFLOW: u32 = 20;
    /// Seconds before a pooled connection is recycled
    pub const POOL_RECYCLE_SECS: u64 = 3600;
    /// Railway base pool size
    pub const RAILWAY_POOL_SIZE: u32 = 5;
    /// Railway overflow connections beyond the base pool
    pub const RAILWAY_MAX_OVERFLOW: u32 = 10;
}

/// Cross-origin resource sharing
pub mod cors {
    /// Origins the frontend dev servers are served from
    pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];
}

/// Error messages
pub mod error_messages {
    /// Body of every 404 response
    pub const RESOURCE_NOT_FOUND: &str = "Resource not found";
    /// Body of every 500 response
    pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
    /// Invalid credentials
    pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
    /// User already exists
    pub const USER_ALREADY_EXISTS: &str = "User with this email already exists";
    /// Username already exists
    pub const USERNAME_TAKEN: &str = "Username already taken";
}

/// Status messages
pub mod status_messages {
    /// Root endpoint fallback when no frontend build is present
    pub const BACKEND_RUNNING: &str = "Meal Mind Backend is running!";
    /// CORS diagnostic endpoint body
    pub const CORS_WORKING: &str = "CORS is working!";
    /// API diagnostic endpoint body
    pub const API_WORKING: &str = "API is working!";
}

/// Demo accounts created by the seeding routine
pub mod seed_accounts {
    /// Admin account email
    pub const ADMIN_EMAIL: &str = "admin@mealmind.com";
    /// Admin account username
    pub const ADMIN_USERNAME: &str = "admin";
    /// Admin account password
    pub const ADMIN_PASSWORD: &str = "admin123";
    /// Test account email
    pub const TEST_EMAIL: &str = "test@mealmind.com";
    /// Test account username
    pub const TEST_USERNAME: &str = "testuser";
    /// Test account password
    pub const TEST_PASSWORD: &str = "test123";
}

/// Validation bounds for profile and activity input
pub mod limits {
    /// Minimum plausible body weight in kilograms
    pub const MIN_WEIGHT_KG: f64 = 20.0;
    /// Maximum plausible body weight in kilograms
    pub const MAX_WEIGHT_KG: f64 = 500.0;
    /// Minimum plausible height in centimeters
    pub const MIN_HEIGHT_CM: f64 = 50.0;
    /// Maximum plausible height in centimeters
    pub const MAX_HEIGHT_CM: f64 = 300.0;
    /// Minimum supported age
    pub const MIN_AGE: i64 = 13;
    /// Maximum supported age
    pub const MAX_AGE: i64 = 120;
    /// Daily calorie targets below this are unsafe
    pub const MIN_CALORIE_TARGET: f64 = 1200.0;
    /// Minimum password length accepted at registration
    pub const MIN_PASSWORD_LENGTH: usize = 6;
    /// Recommendation history rows returned when `limit` is unset
    pub const DEFAULT_HISTORY_LIMIT: i64 = 30;
    /// Upper bound on requested recommendation history rows
    pub const MAX_HISTORY_LIMIT: i64 = 100;
}
