//! Daily meal and workout recommendation engine
//!
//! Computes calorie and macro targets from a user profile with the
//! Mifflin-St Jeor equation, then fills each meal slot from the food
//! catalog deterministically per (date, variant) so a given day always
//! produces the same plan until the user asks for a different one.

use crate::constants::limits;
use crate::database_plugins::factory::Database;
use crate::database_plugins::DatabaseProvider;
use crate::models::{
    ActivityLevel, ActivityType, DailyRecommendation, FoodItem, Gender, Intensity, MealItem,
    MealPlan, MealSlot, MealSlotPlan, UserProfile, WorkoutPlan,
};
use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use std::sync::Arc;

/// Most foods a single meal slot will hold
const MAX_MEAL_ITEMS: usize = 4;

/// Calories a suggested workout should roughly burn
const WORKOUT_TARGET_KCAL: f64 = 300.0;

/// Calorie and macro targets derived from a profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalorieTargets {
    /// Daily calorie target
    pub calories: f64,
    /// Daily protein target in grams
    pub protein_g: f64,
    /// Daily carbohydrate target in grams
    pub carbs_g: f64,
    /// Daily fat target in grams
    pub fat_g: f64,
}

/// Recommendation engine backed by the food and activity catalogs
#[derive(Clone)]
pub struct RecommendationEngine {
    database: Arc<Database>,
}

impl RecommendationEngine {
    /// Create a new recommendation engine
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Basal metabolic rate via Mifflin-St Jeor
    ///
    /// Men: `10w + 6.25h - 5a + 5`; women: `10w + 6.25h - 5a - 161`.
    /// Unspecified genders use the midpoint offset of -78.
    #[must_use]
    pub fn basal_metabolic_rate(profile: &UserProfile) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let base = 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * profile.age as f64;

        match Gender::from_str_or_default(&profile.gender) {
            Gender::Male => base + 5.0,
            Gender::Female => base - 161.0,
            Gender::Other => base - 78.0,
        }
    }

    /// Total daily energy expenditure: BMR scaled by activity level
    #[must_use]
    pub fn daily_energy_expenditure(profile: &UserProfile) -> f64 {
        let level = ActivityLevel::from_str_or_default(&profile.activity_level);
        Self::basal_metabolic_rate(profile) * level.factor()
    }

    /// Daily calorie and macro targets for a profile
    ///
    /// Users aiming below their current weight get a 500 kcal deficit
    /// floored at the minimum safe target; users aiming above it get a
    /// 300 kcal surplus; everyone else maintains.
    #[must_use]
    pub fn calorie_targets(profile: &UserProfile) -> CalorieTargets {
        let expenditure = Self::daily_energy_expenditure(profile);

        let calories = match profile.target_weight_kg {
            Some(target) if target < profile.weight_kg => {
                (expenditure - 500.0).max(limits::MIN_CALORIE_TARGET)
            }
            Some(target) if target > profile.weight_kg => expenditure + 300.0,
            _ => expenditure,
        };

        CalorieTargets {
            calories,
            protein_g: calories * 0.30 / 4.0,
            carbs_g: calories * 0.40 / 4.0,
            fat_g: calories * 0.30 / 9.0,
        }
    }

    /// Fill one meal slot from the catalog foods assigned to it
    ///
    /// Selection starts at `(day ordinal + variant) % options` and walks
    /// forward, skipping foods that would blow the slot budget once at
    /// least one item is planned. The same (date, variant) always yields
    /// the same items.
    #[must_use]
    pub fn plan_meal_slot(
        foods: &[FoodItem],
        slot: MealSlot,
        targets: &CalorieTargets,
        date: NaiveDate,
        variant: u32,
    ) -> MealSlotPlan {
        let target_calories = targets.calories * slot.calorie_share();

        let mut plan = MealSlotPlan {
            items: Vec::new(),
            variant,
            target_calories,
        };

        if foods.is_empty() {
            return plan;
        }

        let ordinal = usize::try_from(date.num_days_from_ce()).unwrap_or(0);
        let start = (ordinal + usize::try_from(variant).unwrap_or(0)) % foods.len();

        let mut total = 0.0;
        for offset in 0..foods.len() {
            let food = &foods[(start + offset) % foods.len()];

            if plan.items.is_empty() || total + food.calories <= target_calories {
                total += food.calories;
                plan.items.push(MealItem::from(food));
            }

            if total >= target_calories || plan.items.len() >= MAX_MEAL_ITEMS {
                break;
            }
        }

        plan
    }

    /// Suggest a workout sized to burn roughly 300 kcal
    ///
    /// Picks from catalog activities whose intensity matches the
    /// profile's activity level, rotating daily; falls back to a brisk
    /// walk when the catalog is empty.
    #[must_use]
    pub fn plan_workout(
        activities: &[ActivityType],
        profile: &UserProfile,
        date: NaiveDate,
    ) -> WorkoutPlan {
        let level = ActivityLevel::from_str_or_default(&profile.activity_level);
        let preferred = match level {
            ActivityLevel::Sedentary | ActivityLevel::Light => Intensity::Low,
            ActivityLevel::Moderate => Intensity::Moderate,
            ActivityLevel::Active | ActivityLevel::VeryActive => Intensity::High,
        };

        let matching: Vec<&ActivityType> = activities
            .iter()
            .filter(|a| a.intensity == preferred)
            .collect();
        let chosen: Vec<&ActivityType> = if matching.is_empty() {
            activities.iter().collect()
        } else {
            matching
        };

        if chosen.is_empty() {
            return WorkoutPlan {
                name: "Brisk walking".to_string(),
                duration_minutes: 50,
                est_calories: WORKOUT_TARGET_KCAL,
                intensity: preferred,
            };
        }

        let ordinal = usize::try_from(date.num_days_from_ce()).unwrap_or(0);
        let activity = chosen[ordinal % chosen.len()];

        let minutes = (WORKOUT_TARGET_KCAL / activity.calories_per_hour * 60.0).clamp(15.0, 120.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let duration_minutes = minutes.round() as u32;
        let est_calories = activity.calories_per_hour * f64::from(duration_minutes) / 60.0;

        WorkoutPlan {
            name: activity.name.clone(),
            duration_minutes,
            est_calories,
            intensity: activity.intensity,
        }
    }

    /// Build the full recommendation for one user and date
    ///
    /// The returned row carries `id: 0`; the storage layer assigns the
    /// real id on upsert.
    ///
    /// # Errors
    ///
    /// Returns an error if catalog queries fail
    pub async fn generate_daily(
        &self,
        profile: &UserProfile,
        date: NaiveDate,
    ) -> Result<DailyRecommendation> {
        let targets = Self::calorie_targets(profile);
        let vegetarian_only = profile.is_vegetarian();

        let mut meal_plan = MealPlan::default();
        for slot in MealSlot::ALL {
            let foods = self
                .database
                .list_food_items_for_slot(slot, vegetarian_only)
                .await?;
            *meal_plan.slot_mut(slot) = Self::plan_meal_slot(&foods, slot, &targets, date, 0);
        }

        let activities = self.database.list_activity_types().await?;
        let workout = Self::plan_workout(&activities, profile, date);

        Ok(DailyRecommendation {
            id: 0,
            user_id: profile.user_id,
            date,
            target_calories: targets.calories,
            target_protein_g: targets.protein_g,
            target_carbs_g: targets.carbs_g,
            target_fat_g: targets.fat_g,
            meal_plan,
            workout,
            created_at: Utc::now(),
        })
    }

    /// Rebuild one meal slot with the next variant so the user sees a
    /// different combination for the same day
    ///
    /// # Errors
    ///
    /// Returns an error if catalog queries fail
    pub async fn regenerate_slot(
        &self,
        recommendation: &mut DailyRecommendation,
        profile: &UserProfile,
        slot: MealSlot,
    ) -> Result<()> {
        let targets = CalorieTargets {
            calories: recommendation.target_calories,
            protein_g: recommendation.target_protein_g,
            carbs_g: recommendation.target_carbs_g,
            fat_g: recommendation.target_fat_g,
        };

        let foods = self
            .database
            .list_food_items_for_slot(slot, profile.is_vegetarian())
            .await?;

        let next_variant = recommendation.meal_plan.slot(slot).variant + 1;
        *recommendation.meal_plan.slot_mut(slot) =
            Self::plan_meal_slot(&foods, slot, &targets, recommendation.date, next_variant);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn profile(gender: &str, activity: &str, target: Option<f64>) -> UserProfile {
        let mut p = UserProfile::new(
            Uuid::new_v4(),
            70.0,
            175.0,
            25,
            gender.to_string(),
            activity.to_string(),
        );
        p.target_weight_kg = target;
        p
    }

    fn food(id: i64, name: &str, calories: f64, slot: MealSlot) -> FoodItem {
        FoodItem {
            id,
            name: name.to_string(),
            calories,
            protein_g: 10.0,
            carbs_g: 20.0,
            fat_g: 5.0,
            category: slot,
            serving: "1 serving".to_string(),
            vegetarian: false,
        }
    }

    #[test]
    fn bmr_follows_mifflin_st_jeor() {
        // 10*70 + 6.25*175 - 5*25 = 1668.75, then +5 male / -161 female
        let male = profile("male", "moderate", None);
        assert!((RecommendationEngine::basal_metabolic_rate(&male) - 1673.75).abs() < 1e-9);

        let female = profile("female", "moderate", None);
        assert!((RecommendationEngine::basal_metabolic_rate(&female) - 1507.75).abs() < 1e-9);
    }

    #[test]
    fn losing_weight_applies_floored_deficit() {
        let mut p = profile("female", "sedentary", Some(50.0));
        p.weight_kg = 45.0;
        // Target above current weight, surplus applies
        let gaining = RecommendationEngine::calorie_targets(&p);
        let expenditure = RecommendationEngine::daily_energy_expenditure(&p);
        assert!((gaining.calories - (expenditure + 300.0)).abs() < 1e-9);

        let mut q = profile("female", "sedentary", Some(45.0));
        q.weight_kg = 45.5;
        let losing = RecommendationEngine::calorie_targets(&q);
        // Deficit would land below the safety floor for a small sedentary person
        assert!(losing.calories >= limits::MIN_CALORIE_TARGET);
    }

    #[test]
    fn macro_split_is_30_40_30() {
        let p = profile("male", "active", None);
        let targets = RecommendationEngine::calorie_targets(&p);

        assert!((targets.protein_g * 4.0 - targets.calories * 0.30).abs() < 1e-6);
        assert!((targets.carbs_g * 4.0 - targets.calories * 0.40).abs() < 1e-6);
        assert!((targets.fat_g * 9.0 - targets.calories * 0.30).abs() < 1e-6);
    }

    #[test]
    fn meal_slot_fill_is_deterministic_and_variant_sensitive() {
        let foods = vec![
            food(1, "Oatmeal", 300.0, MealSlot::Breakfast),
            food(2, "Eggs", 220.0, MealSlot::Breakfast),
            food(3, "Yogurt", 150.0, MealSlot::Breakfast),
        ];
        let p = profile("male", "moderate", None);
        let targets = RecommendationEngine::calorie_targets(&p);
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let first = RecommendationEngine::plan_meal_slot(&foods, MealSlot::Breakfast, &targets, date, 0);
        let again = RecommendationEngine::plan_meal_slot(&foods, MealSlot::Breakfast, &targets, date, 0);
        assert_eq!(first, again);
        assert!(!first.items.is_empty());

        let rotated = RecommendationEngine::plan_meal_slot(&foods, MealSlot::Breakfast, &targets, date, 1);
        assert_ne!(first.items[0].name, rotated.items[0].name);
        assert_eq!(rotated.variant, 1);
    }

    #[test]
    fn empty_catalog_yields_empty_slot_with_budget() {
        let p = profile("male", "moderate", None);
        let targets = RecommendationEngine::calorie_targets(&p);
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let plan = RecommendationEngine::plan_meal_slot(&[], MealSlot::Lunch, &targets, date, 0);
        assert!(plan.items.is_empty());
        assert!((plan.target_calories - targets.calories * 0.35).abs() < 1e-9);
    }

    #[test]
    fn workout_duration_targets_about_300_kcal() {
        let activities = vec![ActivityType {
            id: 1,
            name: "Cycling".to_string(),
            calories_per_hour: 600.0,
            category: "cardio".to_string(),
            intensity: Intensity::Moderate,
        }];
        let p = profile("male", "moderate", None);
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let workout = RecommendationEngine::plan_workout(&activities, &p, date);
        assert_eq!(workout.name, "Cycling");
        assert_eq!(workout.duration_minutes, 30);
        assert!((workout.est_calories - 300.0).abs() < 1.0);
    }

    #[test]
    fn empty_activity_catalog_falls_back_to_walking() {
        let p = profile("female", "light", None);
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let workout = RecommendationEngine::plan_workout(&[], &p, date);
        assert_eq!(workout.name, "Brisk walking");
        assert_eq!(workout.intensity, Intensity::Low);
    }
}
