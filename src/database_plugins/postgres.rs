//! PostgreSQL database implementation
//!
//! This module provides PostgreSQL support for cloud deployments,
//! implementing the same interface as the SQLite version. Uses native
//! UUID, TIMESTAMPTZ, and DATE columns; plan data stays JSON text so
//! both backends serialize identically.

use super::DatabaseProvider;
use crate::config::PoolTuning;
use crate::models::{
    ActivityType, DailyCheckin, DailyRecommendation, FoodItem, Intensity, MealPlan, MealSlot,
    User, UserProfile, WorkoutPlan,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Pool, Postgres, Row};
use std::time::Duration;
use uuid::Uuid;

/// PostgreSQL database implementation
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    /// Convert database row to User model
    fn row_to_user(row: &PgRow) -> Result<User> {
        Ok(User {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
            last_active: row.try_get("last_active")?,
            is_active: row.try_get("is_active")?,
        })
    }

    /// Convert database row to UserProfile model
    fn row_to_user_profile(row: &PgRow) -> Result<UserProfile> {
        Ok(UserProfile {
            user_id: row.try_get("user_id")?,
            weight_kg: row.try_get("weight_kg")?,
            height_cm: row.try_get("height_cm")?,
            age: row.try_get("age")?,
            gender: row.try_get("gender")?,
            activity_level: row.try_get("activity_level")?,
            dietary_restrictions: row.try_get("dietary_restrictions")?,
            target_weight_kg: row.try_get("target_weight_kg")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    /// Convert database row to FoodItem model
    fn row_to_food_item(row: &PgRow) -> Result<FoodItem> {
        let category_str: String = row.try_get("category")?;
        let category = category_str.parse::<MealSlot>()?;

        Ok(FoodItem {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            calories: row.try_get("calories")?,
            protein_g: row.try_get("protein_g")?,
            carbs_g: row.try_get("carbs_g")?,
            fat_g: row.try_get("fat_g")?,
            category,
            serving: row.try_get("serving")?,
            vegetarian: row.try_get("vegetarian")?,
        })
    }

    /// Convert database row to ActivityType model
    fn row_to_activity_type(row: &PgRow) -> Result<ActivityType> {
        let intensity_str: String = row.try_get("intensity")?;

        Ok(ActivityType {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            calories_per_hour: row.try_get("calories_per_hour")?,
            category: row.try_get("category")?,
            intensity: Intensity::from_str_or_default(&intensity_str),
        })
    }

    /// Convert database row to DailyRecommendation model
    fn row_to_daily_recommendation(row: &PgRow) -> Result<DailyRecommendation> {
        let meal_plan_json: String = row.try_get("meal_plan")?;
        let meal_plan: MealPlan = serde_json::from_str(&meal_plan_json)?;

        let workout_json: String = row.try_get("workout")?;
        let workout: WorkoutPlan = serde_json::from_str(&workout_json)?;

        Ok(DailyRecommendation {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            date: row.try_get("date")?,
            target_calories: row.try_get("target_calories")?,
            target_protein_g: row.try_get("target_protein_g")?,
            target_carbs_g: row.try_get("target_carbs_g")?,
            target_fat_g: row.try_get("target_fat_g")?,
            meal_plan,
            workout,
            created_at: row.try_get("created_at")?,
        })
    }

    /// Convert database row to DailyCheckin model
    fn row_to_daily_checkin(row: &PgRow) -> Result<DailyCheckin> {
        Ok(DailyCheckin {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            date: row.try_get("date")?,
            weight_kg: row.try_get("weight_kg")?,
            meals_followed: row.try_get("meals_followed")?,
            workout_completed: row.try_get("workout_completed")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl DatabaseProvider for PostgresDatabase {
    async fn new(database_url: &str, pool: Option<PoolTuning>) -> Result<Self> {
        let pool = match pool {
            Some(tuning) => {
                PgPoolOptions::new()
                    .min_connections(tuning.pool_size)
                    .max_connections(tuning.max_connections())
                    .max_lifetime(Duration::from_secs(tuning.recycle_secs))
                    .test_before_acquire(tuning.pre_ping)
                    .connect(database_url)
                    .await?
            }
            None => PgPool::connect(database_url).await?,
        };

        let db = Self { pool };

        // Run migrations
        db.migrate().await?;

        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        // Create users table with PostgreSQL-specific syntax
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                last_active TIMESTAMPTZ NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT true
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // Create user_profiles table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_profiles (
                user_id UUID PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                weight_kg DOUBLE PRECISION NOT NULL,
                height_cm DOUBLE PRECISION NOT NULL,
                age BIGINT NOT NULL,
                gender TEXT NOT NULL,
                activity_level TEXT NOT NULL,
                dietary_restrictions TEXT,
                target_weight_kg DOUBLE PRECISION,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // Create food_items catalog table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS food_items (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                calories DOUBLE PRECISION NOT NULL,
                protein_g DOUBLE PRECISION NOT NULL,
                carbs_g DOUBLE PRECISION NOT NULL,
                fat_g DOUBLE PRECISION NOT NULL,
                category TEXT NOT NULL,
                serving TEXT NOT NULL,
                vegetarian BOOLEAN NOT NULL DEFAULT false
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // Create index on category for meal slot lookups
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_food_items_category ON food_items(category)")
            .execute(&self.pool)
            .await?;

        // Create activity_types catalog table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS activity_types (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                calories_per_hour DOUBLE PRECISION NOT NULL,
                category TEXT NOT NULL,
                intensity TEXT NOT NULL DEFAULT 'moderate'
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // Create daily_recommendations table, one row per user and date
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS daily_recommendations (
                id BIGSERIAL PRIMARY KEY,
                user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                date DATE NOT NULL,
                target_calories DOUBLE PRECISION NOT NULL,
                target_protein_g DOUBLE PRECISION NOT NULL,
                target_carbs_g DOUBLE PRECISION NOT NULL,
                target_fat_g DOUBLE PRECISION NOT NULL,
                meal_plan TEXT NOT NULL,
                workout TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                UNIQUE (user_id, date)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // Create daily_checkins table, one row per user and date
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS daily_checkins (
                id BIGSERIAL PRIMARY KEY,
                user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                date DATE NOT NULL,
                weight_kg DOUBLE PRECISION,
                meals_followed BOOLEAN NOT NULL DEFAULT false,
                workout_completed BOOLEAN NOT NULL DEFAULT false,
                notes TEXT,
                created_at TIMESTAMPTZ NOT NULL,
                UNIQUE (user_id, date)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn create_user(&self, user: &User) -> Result<Uuid> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, username, password_hash, created_at, last_active, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.last_active)
        .bind(user.is_active)
        .execute(&self.pool)
        .await?;

        Ok(user.id)
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn update_last_active(&self, user_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE users SET last_active = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_password(&self, user_id: Uuid, password_hash: &str) -> Result<()> {
        sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<()> {
        // Child rows are removed by ON DELETE CASCADE
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_user_count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM users")
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    async fn upsert_user_profile(&self, profile: &UserProfile) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_profiles (
                user_id, weight_kg, height_cm, age, gender, activity_level,
                dietary_restrictions, target_weight_kg, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (user_id) DO UPDATE SET
                weight_kg = excluded.weight_kg,
                height_cm = excluded.height_cm,
                age = excluded.age,
                gender = excluded.gender,
                activity_level = excluded.activity_level,
                dietary_restrictions = excluded.dietary_restrictions,
                target_weight_kg = excluded.target_weight_kg,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(profile.user_id)
        .bind(profile.weight_kg)
        .bind(profile.height_cm)
        .bind(profile.age)
        .bind(&profile.gender)
        .bind(&profile.activity_level)
        .bind(profile.dietary_restrictions.as_deref())
        .bind(profile.target_weight_kg)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_user_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        let row = sqlx::query("SELECT * FROM user_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_user_profile(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert_food_item(&self, item: &FoodItem) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO food_items (name, calories, protein_g, carbs_g, fat_g, category, serving, vegetarian)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&item.name)
        .bind(item.calories)
        .bind(item.protein_g)
        .bind(item.carbs_g)
        .bind(item.fat_g)
        .bind(item.category.as_str())
        .bind(&item.serving)
        .bind(item.vegetarian)
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.try_get("id")?;
        Ok(id)
    }

    async fn list_food_items_for_slot(
        &self,
        slot: MealSlot,
        vegetarian_only: bool,
    ) -> Result<Vec<FoodItem>> {
        let rows = if vegetarian_only {
            sqlx::query(
                "SELECT * FROM food_items WHERE category = $1 AND vegetarian = true ORDER BY id",
            )
            .bind(slot.as_str())
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query("SELECT * FROM food_items WHERE category = $1 ORDER BY id")
                .bind(slot.as_str())
                .fetch_all(&self.pool)
                .await?
        };

        rows.iter().map(Self::row_to_food_item).collect()
    }

    async fn get_food_item_count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM food_items")
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    async fn insert_activity_type(&self, activity: &ActivityType) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO activity_types (name, calories_per_hour, category, intensity)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&activity.name)
        .bind(activity.calories_per_hour)
        .bind(&activity.category)
        .bind(activity.intensity.as_str())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.try_get("id")?;
        Ok(id)
    }

    async fn list_activity_types(&self) -> Result<Vec<ActivityType>> {
        let rows = sqlx::query("SELECT * FROM activity_types ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_activity_type).collect()
    }

    async fn search_activity_types(&self, query: &str) -> Result<Vec<ActivityType>> {
        let rows = sqlx::query("SELECT * FROM activity_types WHERE name ILIKE $1 ORDER BY name")
            .bind(format!("%{query}%"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_activity_type).collect()
    }

    async fn upsert_daily_recommendation(
        &self,
        recommendation: &DailyRecommendation,
    ) -> Result<i64> {
        let meal_plan_json = serde_json::to_string(&recommendation.meal_plan)?;
        let workout_json = serde_json::to_string(&recommendation.workout)?;

        let row = sqlx::query(
            r#"
            INSERT INTO daily_recommendations (
                user_id, date, target_calories, target_protein_g, target_carbs_g, target_fat_g,
                meal_plan, workout, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id, date) DO UPDATE SET
                target_calories = excluded.target_calories,
                target_protein_g = excluded.target_protein_g,
                target_carbs_g = excluded.target_carbs_g,
                target_fat_g = excluded.target_fat_g,
                meal_plan = excluded.meal_plan,
                workout = excluded.workout
            RETURNING id
            "#,
        )
        .bind(recommendation.user_id)
        .bind(recommendation.date)
        .bind(recommendation.target_calories)
        .bind(recommendation.target_protein_g)
        .bind(recommendation.target_carbs_g)
        .bind(recommendation.target_fat_g)
        .bind(&meal_plan_json)
        .bind(&workout_json)
        .bind(recommendation.created_at)
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.try_get("id")?;
        Ok(id)
    }

    async fn get_daily_recommendation(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<DailyRecommendation>> {
        let row =
            sqlx::query("SELECT * FROM daily_recommendations WHERE user_id = $1 AND date = $2")
                .bind(user_id)
                .bind(date)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_daily_recommendation(&row)?)),
            None => Ok(None),
        }
    }

    async fn update_recommendation_meals(
        &self,
        recommendation_id: i64,
        meal_plan: &MealPlan,
    ) -> Result<()> {
        let meal_plan_json = serde_json::to_string(meal_plan)?;

        sqlx::query("UPDATE daily_recommendations SET meal_plan = $1 WHERE id = $2")
            .bind(&meal_plan_json)
            .bind(recommendation_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_daily_recommendations(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<DailyRecommendation>> {
        let rows = sqlx::query(
            "SELECT * FROM daily_recommendations WHERE user_id = $1 ORDER BY date DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_daily_recommendation).collect()
    }

    async fn upsert_daily_checkin(&self, checkin: &DailyCheckin) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO daily_checkins (
                user_id, date, weight_kg, meals_followed, workout_completed, notes, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, date) DO UPDATE SET
                weight_kg = excluded.weight_kg,
                meals_followed = excluded.meals_followed,
                workout_completed = excluded.workout_completed,
                notes = excluded.notes
            RETURNING id
            "#,
        )
        .bind(checkin.user_id)
        .bind(checkin.date)
        .bind(checkin.weight_kg)
        .bind(checkin.meals_followed)
        .bind(checkin.workout_completed)
        .bind(checkin.notes.as_deref())
        .bind(checkin.created_at)
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.try_get("id")?;
        Ok(id)
    }

    async fn get_daily_checkin(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<DailyCheckin>> {
        let row = sqlx::query("SELECT * FROM daily_checkins WHERE user_id = $1 AND date = $2")
            .bind(user_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_daily_checkin(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_daily_checkins(&self, user_id: Uuid) -> Result<Vec<DailyCheckin>> {
        let rows = sqlx::query("SELECT * FROM daily_checkins WHERE user_id = $1 ORDER BY date ASC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_daily_checkin).collect()
    }
}
