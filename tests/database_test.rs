// ABOUTME: Integration tests for the SQLite database backend
// ABOUTME: Covers file-backed persistence, schema reuse, and catalog queries
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use mealmind_server::config::environment::{EnvSettings, ServerConfig};
use mealmind_server::database_plugins::{factory::Database, DatabaseProvider};
use mealmind_server::models::{ActivityType, FoodItem, Intensity, MealSlot, User};
use mealmind_server::server::ensure_database_directories;

async fn memory_database() -> Result<Database> {
    Database::new("sqlite::memory:", None).await
}

fn food(name: &str, slot: MealSlot, vegetarian: bool) -> FoodItem {
    FoodItem {
        id: 0,
        name: name.to_owned(),
        calories: 300.0,
        protein_g: 15.0,
        carbs_g: 30.0,
        fat_g: 10.0,
        category: slot,
        serving: "1 serving".to_owned(),
        vegetarian,
    }
}

#[tokio::test]
async fn test_file_backed_database_survives_reopen() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite:{}", dir.path().join("meal.db").display());

    let user_id = {
        let database = Database::new(&url, None).await?;
        let user = User::new(
            "persist@example.com".to_owned(),
            "persist".to_owned(),
            "hash".to_owned(),
        );
        database.create_user(&user).await?
    };

    // Reopening runs the migrations again; they must tolerate the existing schema
    let database = Database::new(&url, None).await?;
    let user = database
        .get_user_by_email("persist@example.com")
        .await?
        .expect("user survives reopen");
    assert_eq!(user.id, user_id);
    assert_eq!(user.username, "persist");
    Ok(())
}

#[tokio::test]
async fn test_nested_database_directories_are_created() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let nested = dir.path().join("nested").join("data");
    let env = EnvSettings {
        dev_database_url: Some(format!("sqlite:{}", nested.join("dev.db").display())),
        ..EnvSettings::default()
    };
    let config = ServerConfig::resolve(Some("development"), &env)?;

    ensure_database_directories(&config)?;
    assert!(nested.is_dir());

    let database = Database::new(&config.database.url.to_connection_string(), None).await?;
    assert_eq!(database.get_user_count().await?, 0);
    assert!(nested.join("dev.db").is_file());
    Ok(())
}

#[tokio::test]
async fn test_slot_listing_honors_the_vegetarian_filter() -> Result<()> {
    let database = memory_database().await?;
    database
        .insert_food_item(&food("Bacon and eggs", MealSlot::Breakfast, false))
        .await?;
    database
        .insert_food_item(&food("Oatmeal", MealSlot::Breakfast, true))
        .await?;
    database
        .insert_food_item(&food("Grilled chicken", MealSlot::Lunch, false))
        .await?;

    let everything = database
        .list_food_items_for_slot(MealSlot::Breakfast, false)
        .await?;
    assert_eq!(everything.len(), 2);

    let vegetarian = database
        .list_food_items_for_slot(MealSlot::Breakfast, true)
        .await?;
    assert_eq!(vegetarian.len(), 1);
    assert_eq!(vegetarian[0].name, "Oatmeal");
    Ok(())
}

#[tokio::test]
async fn test_activity_search_matches_substrings() -> Result<()> {
    let database = memory_database().await?;
    for name in ["Running", "Rowing", "Swimming"] {
        database
            .insert_activity_type(&ActivityType {
                id: 0,
                name: name.to_owned(),
                calories_per_hour: 500.0,
                category: "cardio".to_owned(),
                intensity: Intensity::Moderate,
            })
            .await?;
    }

    let hits = database.search_activity_types("run").await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Running");

    let hits = database.search_activity_types("ing").await?;
    assert_eq!(hits.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_user_lifecycle_roundtrip() -> Result<()> {
    let database = memory_database().await?;
    let user = User::new(
        "cycle@example.com".to_owned(),
        "cycle".to_owned(),
        "original-hash".to_owned(),
    );
    let user_id = database.create_user(&user).await?;

    let by_username = database
        .get_user_by_username("cycle")
        .await?
        .expect("lookup by username");
    assert_eq!(by_username.id, user_id);

    database.update_password(user_id, "rotated-hash").await?;
    database.update_last_active(user_id).await?;
    let reloaded = database.get_user(user_id).await?.expect("user exists");
    assert_eq!(reloaded.password_hash, "rotated-hash");

    database.delete_user(user_id).await?;
    assert!(database.get_user(user_id).await?.is_none());
    assert_eq!(database.get_user_count().await?, 0);
    Ok(())
}
