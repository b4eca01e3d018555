// ABOUTME: Demo data seeder inserting fixed accounts and the starter catalogs
// ABOUTME: Runs once against an empty database and is a no-op afterwards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Demo data seeding.
//!
//! A fresh deployment gets two login-ready accounts, a companion profile
//! for the test account, and starter food and activity catalogs for the
//! recommendation engine to draw from. Every step checks for existing
//! rows first, so re-running against a populated database changes nothing.

use crate::{
    constants::seed_accounts,
    database_plugins::{factory::Database, DatabaseProvider},
    errors::AppError,
    models::{ActivityType, FoodItem, Intensity, MealSlot, User, UserProfile},
};
use anyhow::{Context, Result};
use tracing::info;

/// What a seeding pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Demo rows were inserted into an empty database
    Seeded,
    /// Rows already present, nothing inserted
    Skipped,
}

/// Fixed demo account row
struct SeedAccount {
    email: &'static str,
    username: &'static str,
    password: &'static str,
    /// The test account carries a profile so recommendations work on first login
    with_profile: bool,
}

const SEED_ACCOUNTS: &[SeedAccount] = &[
    SeedAccount {
        email: seed_accounts::ADMIN_EMAIL,
        username: seed_accounts::ADMIN_USERNAME,
        password: seed_accounts::ADMIN_PASSWORD,
        with_profile: false,
    },
    SeedAccount {
        email: seed_accounts::TEST_EMAIL,
        username: seed_accounts::TEST_USERNAME,
        password: seed_accounts::TEST_PASSWORD,
        with_profile: true,
    },
];

/// Starter food catalog row
struct SeedFood {
    name: &'static str,
    calories: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
    slot: MealSlot,
    serving: &'static str,
    vegetarian: bool,
}

#[rustfmt::skip]
const SEED_FOODS: &[SeedFood] = &[
    SeedFood { name: "Oatmeal with banana", calories: 280.0, protein_g: 8.0, carbs_g: 54.0, fat_g: 5.0, slot: MealSlot::Breakfast, serving: "1 bowl (250 g)", vegetarian: true },
    SeedFood { name: "Scrambled eggs on toast", calories: 320.0, protein_g: 18.0, carbs_g: 28.0, fat_g: 14.0, slot: MealSlot::Breakfast, serving: "2 eggs, 1 slice", vegetarian: true },
    SeedFood { name: "Greek yogurt with honey", calories: 180.0, protein_g: 15.0, carbs_g: 22.0, fat_g: 4.0, slot: MealSlot::Breakfast, serving: "1 cup (200 g)", vegetarian: true },
    SeedFood { name: "Chicken congee", calories: 250.0, protein_g: 15.0, carbs_g: 35.0, fat_g: 6.0, slot: MealSlot::Breakfast, serving: "1 bowl", vegetarian: false },
    SeedFood { name: "Grilled chicken rice bowl", calories: 520.0, protein_g: 38.0, carbs_g: 58.0, fat_g: 12.0, slot: MealSlot::Lunch, serving: "1 bowl", vegetarian: false },
    SeedFood { name: "Beef and vegetable stir-fry", calories: 480.0, protein_g: 32.0, carbs_g: 36.0, fat_g: 22.0, slot: MealSlot::Lunch, serving: "1 plate", vegetarian: false },
    SeedFood { name: "Tofu curry with rice", calories: 450.0, protein_g: 20.0, carbs_g: 62.0, fat_g: 14.0, slot: MealSlot::Lunch, serving: "1 plate", vegetarian: true },
    SeedFood { name: "Tuna salad sandwich", calories: 380.0, protein_g: 24.0, carbs_g: 40.0, fat_g: 12.0, slot: MealSlot::Lunch, serving: "1 sandwich", vegetarian: false },
    SeedFood { name: "Baked salmon with potatoes", calories: 460.0, protein_g: 34.0, carbs_g: 38.0, fat_g: 18.0, slot: MealSlot::Dinner, serving: "1 fillet with sides", vegetarian: false },
    SeedFood { name: "Chicken noodle soup", calories: 380.0, protein_g: 26.0, carbs_g: 44.0, fat_g: 10.0, slot: MealSlot::Dinner, serving: "1 bowl", vegetarian: false },
    SeedFood { name: "Vegetable lasagna", calories: 420.0, protein_g: 18.0, carbs_g: 50.0, fat_g: 16.0, slot: MealSlot::Dinner, serving: "1 slice", vegetarian: true },
    SeedFood { name: "Lean beef with broccoli", calories: 400.0, protein_g: 35.0, carbs_g: 20.0, fat_g: 20.0, slot: MealSlot::Dinner, serving: "1 plate", vegetarian: false },
    SeedFood { name: "Apple with peanut butter", calories: 190.0, protein_g: 5.0, carbs_g: 24.0, fat_g: 9.0, slot: MealSlot::Snacks, serving: "1 apple, 1 tbsp", vegetarian: true },
    SeedFood { name: "Mixed nuts", calories: 170.0, protein_g: 6.0, carbs_g: 6.0, fat_g: 15.0, slot: MealSlot::Snacks, serving: "30 g", vegetarian: true },
    SeedFood { name: "Protein shake", calories: 160.0, protein_g: 25.0, carbs_g: 9.0, fat_g: 3.0, slot: MealSlot::Snacks, serving: "1 scoop with water", vegetarian: true },
    SeedFood { name: "Banana", calories: 105.0, protein_g: 1.0, carbs_g: 27.0, fat_g: 0.4, slot: MealSlot::Snacks, serving: "1 medium", vegetarian: true },
];

/// Starter activity catalog row
struct SeedActivity {
    name: &'static str,
    calories_per_hour: f64,
    category: &'static str,
    intensity: Intensity,
}

#[rustfmt::skip]
const SEED_ACTIVITIES: &[SeedActivity] = &[
    SeedActivity { name: "Walking", calories_per_hour: 280.0, category: "cardio", intensity: Intensity::Low },
    SeedActivity { name: "Brisk walking", calories_per_hour: 350.0, category: "cardio", intensity: Intensity::Low },
    SeedActivity { name: "Yoga", calories_per_hour: 220.0, category: "flexibility", intensity: Intensity::Low },
    SeedActivity { name: "Cycling", calories_per_hour: 480.0, category: "cardio", intensity: Intensity::Moderate },
    SeedActivity { name: "Swimming", calories_per_hour: 550.0, category: "cardio", intensity: Intensity::Moderate },
    SeedActivity { name: "Jogging", calories_per_hour: 560.0, category: "cardio", intensity: Intensity::Moderate },
    SeedActivity { name: "Strength training", calories_per_hour: 360.0, category: "strength", intensity: Intensity::Moderate },
    SeedActivity { name: "Running", calories_per_hour: 700.0, category: "cardio", intensity: Intensity::High },
    SeedActivity { name: "HIIT circuit", calories_per_hour: 650.0, category: "cardio", intensity: Intensity::High },
    SeedActivity { name: "Rowing", calories_per_hour: 600.0, category: "cardio", intensity: Intensity::High },
];

/// Weight and body metrics for the test account's companion profile
const SEED_PROFILE_WEIGHT_KG: f64 = 70.0;
const SEED_PROFILE_HEIGHT_CM: f64 = 175.0;
const SEED_PROFILE_AGE: i64 = 25;
const SEED_PROFILE_TARGET_KG: f64 = 65.0;

/// Insert the demo accounts and companion profile when the user table is empty
///
/// # Errors
///
/// Returns an error if password hashing or any insert fails. A concurrent
/// cold start racing this function is stopped by the unique constraints on
/// email and username.
pub async fn seed_demo_accounts(database: &Database) -> Result<SeedOutcome> {
    let user_count = database
        .get_user_count()
        .await
        .context("Failed to count users before seeding")?;
    if user_count > 0 {
        info!("Database already has {user_count} users, skipping demo account seed");
        return Ok(SeedOutcome::Skipped);
    }

    info!("Database is empty, seeding demo accounts");
    for account in SEED_ACCOUNTS {
        let password_hash = hash_password(account.password)?;
        let user = User::new(
            account.email.to_owned(),
            account.username.to_owned(),
            password_hash,
        );
        let user_id = database
            .create_user(&user)
            .await
            .with_context(|| format!("Failed to seed account {}", account.email))?;

        if account.with_profile {
            let mut profile = UserProfile::new(
                user_id,
                SEED_PROFILE_WEIGHT_KG,
                SEED_PROFILE_HEIGHT_CM,
                SEED_PROFILE_AGE,
                "male".to_owned(),
                "moderate".to_owned(),
            );
            profile.target_weight_kg = Some(SEED_PROFILE_TARGET_KG);
            database
                .upsert_user_profile(&profile)
                .await
                .with_context(|| format!("Failed to seed profile for {}", account.email))?;
        }
        info!("Seeded account {} ({})", account.email, account.username);
    }

    Ok(SeedOutcome::Seeded)
}

/// Insert the starter food and activity catalogs when the food table is empty
///
/// # Errors
///
/// Returns an error if any catalog insert fails.
pub async fn seed_catalogs(database: &Database) -> Result<SeedOutcome> {
    let food_count = database
        .get_food_item_count()
        .await
        .context("Failed to count food items before seeding")?;
    if food_count > 0 {
        info!("Food catalog already has {food_count} items, skipping catalog seed");
        return Ok(SeedOutcome::Skipped);
    }

    info!(
        "Seeding {} foods and {} activities",
        SEED_FOODS.len(),
        SEED_ACTIVITIES.len()
    );
    for food in SEED_FOODS {
        let item = FoodItem {
            id: 0,
            name: food.name.to_owned(),
            calories: food.calories,
            protein_g: food.protein_g,
            carbs_g: food.carbs_g,
            fat_g: food.fat_g,
            category: food.slot,
            serving: food.serving.to_owned(),
            vegetarian: food.vegetarian,
        };
        database
            .insert_food_item(&item)
            .await
            .with_context(|| format!("Failed to seed food {}", food.name))?;
    }
    for activity in SEED_ACTIVITIES {
        let row = ActivityType {
            id: 0,
            name: activity.name.to_owned(),
            calories_per_hour: activity.calories_per_hour,
            category: activity.category.to_owned(),
            intensity: activity.intensity,
        };
        database
            .insert_activity_type(&row)
            .await
            .with_context(|| format!("Failed to seed activity {}", activity.name))?;
    }

    Ok(SeedOutcome::Seeded)
}

/// Run both seed passes, reporting the account outcome
///
/// # Errors
///
/// Returns an error if either pass fails; startup treats that as fatal.
pub async fn seed_all(database: &Database) -> Result<SeedOutcome> {
    let accounts = seed_demo_accounts(database).await?;
    seed_catalogs(database).await?;
    Ok(accounts)
}

fn hash_password(password: &str) -> Result<String, AppError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}
