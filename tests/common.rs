// ABOUTME: Shared test utilities and fixture builders for integration tests
// ABOUTME: Provides quiet logging setup plus ingredient, entry, recipe, and enrollment helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `coachplan`

use chrono::NaiveDate;
use coachplan::models::{
    Enrollment, Ingredient, MealEntry, MealSlot, MeasuredAmount, NutritionPer100g, Recipe,
};
use std::sync::Once;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Calendar date shorthand
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Ingredient with known macros per 100g
pub fn ingredient(id: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> Ingredient {
    Ingredient::new(id, id).with_nutrition(NutritionPer100g {
        calories: Some(calories),
        protein: Some(protein),
        carbs: Some(carbs),
        fat: Some(fat),
        ..NutritionPer100g::default()
    })
}

/// Meal entry of `amount` `unit` of an ingredient
pub fn entry(
    plan_id: &str,
    slot: MealSlot,
    amount: f64,
    unit: &str,
    ingredient: Ingredient,
) -> MealEntry {
    MealEntry::new(plan_id, slot, MeasuredAmount::new(amount, unit), ingredient)
}

/// Single-serving recipe whose per-serving macros equal the given values
///
/// Built from 100 g of one ingredient so derivation is exact.
pub fn recipe_with_macros(id: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> Recipe {
    Recipe::new(id, format!("Recipe {id}"), 1).with_ingredient(
        MeasuredAmount::new(100.0, "g"),
        ingredient(&format!("{id}-base"), calories, protein, carbs, fat),
    )
}

/// Enrollment in `path_id` starting on `start`
pub fn enrollment(path_id: &str, start: NaiveDate, variants: &[&str]) -> Enrollment {
    Enrollment::new(
        Uuid::new_v4(),
        path_id,
        start,
        variants.iter().map(|v| (*v).to_owned()).collect(),
    )
}
