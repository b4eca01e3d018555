// ABOUTME: Core data models and types for the Meal Mind API
// ABOUTME: Defines User, UserProfile, FoodItem, meal plans and other fundamental data structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! This module contains the core data structures used throughout the Meal Mind
//! backend: accounts, health profiles, the food and activity catalogs, and the
//! daily recommendation records the engine produces.
//!
//! ## Design Principles
//!
//! - **Serializable**: All models support JSON serialization for the REST API
//! - **Type Safe**: Classification fields parse into enums with lenient
//!   fallbacks so stored free-form strings never crash the engine
//! - **Storage Agnostic**: Models carry no connection handles; the database
//!   layer maps rows in and out

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// A registered account
///
/// Passwords are only ever stored as bcrypt hashes; the plaintext never
/// touches the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// User email address (globally unique)
    pub email: String,
    /// Username (globally unique)
    pub username: String,
    /// Hashed password for authentication
    pub password_hash: String,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// Last time the user accessed the system
    pub last_active: DateTime<Utc>,
    /// Whether the user account is active
    pub is_active: bool,
}

impl User {
    /// Create a new user with the given email, username and password hash
    #[must_use]
    pub fn new(email: String, username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            username,
            password_hash,
            created_at: now,
            last_active: now,
            is_active: true,
        }
    }

    /// Update last active timestamp
    pub fn update_last_active(&mut self) {
        self.last_active = Utc::now();
    }
}

/// Health profile, one-to-one with [`User`]
///
/// The classification fields (`gender`, `activity_level`,
/// `dietary_restrictions`) are stored as free-form strings; the
/// recommendation engine parses them leniently via [`Gender`] and
/// [`ActivityLevel`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User this profile belongs to
    pub user_id: Uuid,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in years
    pub age: i64,
    /// Gender classification
    pub gender: String,
    /// Activity level classification
    pub activity_level: String,
    /// Free-form dietary restrictions (e.g. "vegetarian")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<String>,
    /// Target body weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight_kg: Option<f64>,
    /// When the profile was created
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a new profile for a user
    #[must_use]
    pub fn new(
        user_id: Uuid,
        weight_kg: f64,
        height_cm: f64,
        age: i64,
        gender: String,
        activity_level: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            weight_kg,
            height_cm,
            age,
            gender,
            activity_level,
            dietary_restrictions: None,
            target_weight_kg: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the stored restrictions mention a vegetarian diet
    #[must_use]
    pub fn is_vegetarian(&self) -> bool {
        self.dietary_restrictions
            .as_deref()
            .is_some_and(|r| r.to_lowercase().contains("vegetarian"))
    }
}

/// Gender classification used by the energy-expenditure formulas
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male, using the male basal-metabolic-rate constant
    Male,
    /// Female, using the female basal-metabolic-rate constant
    Female,
    /// Anything the lenient parse does not recognize
    Other,
}

impl Gender {
    /// Parse from a stored free-form string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "male" | "m" | "man" => Self::Male,
            "female" | "f" | "woman" => Self::Female,
            _ => Self::Other,
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Activity level classification selecting an energy-expenditure factor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise one to three days a week
    Light,
    /// Moderate exercise three to five days a week
    Moderate,
    /// Hard exercise six to seven days a week
    Active,
    /// Very hard exercise or a physical job
    VeryActive,
}

impl ActivityLevel {
    /// Multiplier applied to basal metabolic rate
    #[must_use]
    pub const fn factor(&self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }

    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        }
    }

    /// Parse from a stored free-form string, defaulting to `Moderate`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "sedentary" => Self::Sedentary,
            "light" | "lightly_active" => Self::Light,
            "active" | "very" => Self::Active,
            "very_active" | "extra_active" => Self::VeryActive,
            _ => Self::Moderate,
        }
    }
}

impl Display for ActivityLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Meal slot within a daily plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    /// First meal of the day
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
    /// Snacks spread across the day
    Snacks,
}

impl MealSlot {
    /// All slots in plan order
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snacks];

    /// Share of the daily calorie target allotted to this slot
    #[must_use]
    pub const fn calorie_share(&self) -> f64 {
        match self {
            Self::Breakfast => 0.25,
            Self::Lunch => 0.35,
            Self::Dinner => 0.30,
            Self::Snacks => 0.10,
        }
    }

    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snacks => "snacks",
        }
    }
}

impl FromStr for MealSlot {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snacks" | "snack" => Ok(Self::Snacks),
            other => Err(AppError::invalid_input(format!(
                "Unknown meal slot: {other}"
            ))),
        }
    }
}

impl Display for MealSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Catalog entry the recommendation engine draws meals from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    /// Catalog identifier
    pub id: i64,
    /// Food name
    pub name: String,
    /// Calories per serving
    pub calories: f64,
    /// Protein per serving in grams
    pub protein_g: f64,
    /// Carbohydrates per serving in grams
    pub carbs_g: f64,
    /// Fat per serving in grams
    pub fat_g: f64,
    /// Which meal slot this food belongs to
    pub category: MealSlot,
    /// Human-readable serving description
    pub serving: String,
    /// Whether the food is vegetarian-friendly
    pub vegetarian: bool,
}

/// Catalog entry for physical activities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityType {
    /// Catalog identifier
    pub id: i64,
    /// Activity name
    pub name: String,
    /// Estimated calories burned per hour
    pub calories_per_hour: f64,
    /// Category (e.g. "cardio", "strength", "flexibility")
    pub category: String,
    /// How demanding the activity is
    pub intensity: Intensity,
}

/// Intensity classification for activities
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    /// Gentle activities such as walking or yoga
    Low,
    /// Sustained effort such as cycling or swimming
    Moderate,
    /// Demanding activities such as running or HIIT
    High,
}

impl Intensity {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }

    /// Parse from a stored string, defaulting to `Moderate`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Moderate,
        }
    }
}

impl Display for Intensity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// A single food line within a planned meal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealItem {
    /// Food name
    pub name: String,
    /// Calories for the planned serving
    pub calories: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
    /// Fat in grams
    pub fat_g: f64,
    /// Serving description
    pub serving: String,
}

impl From<&FoodItem> for MealItem {
    fn from(food: &FoodItem) -> Self {
        Self {
            name: food.name.clone(),
            calories: food.calories,
            protein_g: food.protein_g,
            carbs_g: food.carbs_g,
            fat_g: food.fat_g,
            serving: food.serving.clone(),
        }
    }
}

/// Planned contents of one meal slot
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MealSlotPlan {
    /// Foods planned for the slot
    pub items: Vec<MealItem>,
    /// Variant counter; regeneration bumps this to rotate choices
    pub variant: u32,
    /// Calorie budget for the slot
    pub target_calories: f64,
}

/// Full daily meal plan across all slots
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MealPlan {
    /// Breakfast slot plan
    pub breakfast: MealSlotPlan,
    /// Lunch slot plan
    pub lunch: MealSlotPlan,
    /// Dinner slot plan
    pub dinner: MealSlotPlan,
    /// Snacks slot plan
    pub snacks: MealSlotPlan,
}

impl MealPlan {
    /// Borrow the plan for a slot
    #[must_use]
    pub const fn slot(&self, slot: MealSlot) -> &MealSlotPlan {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    /// Mutably borrow the plan for a slot
    pub fn slot_mut(&mut self, slot: MealSlot) -> &mut MealSlotPlan {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
            MealSlot::Snacks => &mut self.snacks,
        }
    }

    /// Total planned calories across all slots
    #[must_use]
    pub fn total_calories(&self) -> f64 {
        MealSlot::ALL
            .iter()
            .map(|slot| {
                self.slot(*slot)
                    .items
                    .iter()
                    .map(|item| item.calories)
                    .sum::<f64>()
            })
            .sum()
    }
}

/// Suggested workout accompanying a daily plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    /// Activity name
    pub name: String,
    /// Suggested duration in minutes
    pub duration_minutes: u32,
    /// Estimated calories burned over the duration
    pub est_calories: f64,
    /// Activity intensity
    pub intensity: Intensity,
}

/// A stored daily recommendation: calorie/macro targets plus the plans
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRecommendation {
    /// Row identifier
    pub id: i64,
    /// User the recommendation belongs to
    pub user_id: Uuid,
    /// Day the recommendation covers
    pub date: NaiveDate,
    /// Daily calorie target
    pub target_calories: f64,
    /// Daily protein target in grams
    pub target_protein_g: f64,
    /// Daily carbohydrate target in grams
    pub target_carbs_g: f64,
    /// Daily fat target in grams
    pub target_fat_g: f64,
    /// Planned meals
    pub meal_plan: MealPlan,
    /// Suggested workout
    pub workout: WorkoutPlan,
    /// When the recommendation was generated
    pub created_at: DateTime<Utc>,
}

/// A user's daily check-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyCheckin {
    /// Row identifier
    pub id: i64,
    /// User the check-in belongs to
    pub user_id: Uuid,
    /// Day the check-in covers
    pub date: NaiveDate,
    /// Weight recorded that day, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Whether the planned meals were followed
    pub meals_followed: bool,
    /// Whether the suggested workout was completed
    pub workout_completed: bool,
    /// Free-form notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the check-in was recorded
    pub created_at: DateTime<Utc>,
}
