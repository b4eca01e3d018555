// ABOUTME: Database abstraction layer for the Meal Mind server
// ABOUTME: Plugin architecture for database support with SQLite and PostgreSQL backends

use crate::config::PoolTuning;
use crate::models::{
    ActivityType, DailyCheckin, DailyRecommendation, FoodItem, MealPlan, MealSlot, User,
    UserProfile,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

pub mod factory;
pub mod sqlite;

#[cfg(feature = "postgresql")]
pub mod postgres;

/// Core database abstraction trait
///
/// All database implementations must implement this trait to provide
/// a consistent interface for the application layer.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + Clone {
    /// Create a new database connection with optional pool tuning
    async fn new(database_url: &str, pool: Option<PoolTuning>) -> Result<Self>
    where
        Self: Sized;

    /// Run database migrations to set up schema
    async fn migrate(&self) -> Result<()>;

    // ================================
    // User Management
    // ================================

    /// Create a new user account
    async fn create_user(&self, user: &User) -> Result<Uuid>;

    /// Get user by ID
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>>;

    /// Get user by email address
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Get user by username
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Update user's last active timestamp
    async fn update_last_active(&self, user_id: Uuid) -> Result<()>;

    /// Replace a user's password hash
    async fn update_password(&self, user_id: Uuid, password_hash: &str) -> Result<()>;

    /// Delete a user together with every row that references them
    async fn delete_user(&self, user_id: Uuid) -> Result<()>;

    /// Get total number of users
    async fn get_user_count(&self) -> Result<i64>;

    // ================================
    // User Profiles
    // ================================

    /// Insert or update a user's profile, preserving the original creation time
    async fn upsert_user_profile(&self, profile: &UserProfile) -> Result<()>;

    /// Get a user's profile
    async fn get_user_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>>;

    // ================================
    // Food and Activity Catalogs
    // ================================

    /// Insert a food item into the catalog, returning its row id
    async fn insert_food_item(&self, item: &FoodItem) -> Result<i64>;

    /// List catalog foods assigned to one meal slot, optionally vegetarian only
    async fn list_food_items_for_slot(
        &self,
        slot: MealSlot,
        vegetarian_only: bool,
    ) -> Result<Vec<FoodItem>>;

    /// Count rows in the food catalog
    async fn get_food_item_count(&self) -> Result<i64>;

    /// Insert an activity type, returning its row id
    async fn insert_activity_type(&self, activity: &ActivityType) -> Result<i64>;

    /// List all activity types ordered by name
    async fn list_activity_types(&self) -> Result<Vec<ActivityType>>;

    /// Search activity types by name substring
    async fn search_activity_types(&self, query: &str) -> Result<Vec<ActivityType>>;

    // ================================
    // Daily Recommendations
    // ================================

    /// Store the recommendation for (user, date), replacing an existing one
    async fn upsert_daily_recommendation(&self, recommendation: &DailyRecommendation)
        -> Result<i64>;

    /// Get the recommendation for one user and date
    async fn get_daily_recommendation(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<DailyRecommendation>>;

    /// Replace the meal plan of a stored recommendation
    async fn update_recommendation_meals(
        &self,
        recommendation_id: i64,
        meal_plan: &MealPlan,
    ) -> Result<()>;

    /// List recent recommendations for a user, newest first
    async fn list_daily_recommendations(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<DailyRecommendation>>;

    // ================================
    // Daily Check-ins
    // ================================

    /// Insert or update the check-in for (user, date)
    async fn upsert_daily_checkin(&self, checkin: &DailyCheckin) -> Result<i64>;

    /// Get the check-in for one user and date
    async fn get_daily_checkin(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<DailyCheckin>>;

    /// List a user's check-ins in ascending date order
    async fn list_daily_checkins(&self, user_id: Uuid) -> Result<Vec<DailyCheckin>>;
}
