// ABOUTME: Core data models for the planning engine
// ABOUTME: Units, ingredients, meal entries, recipes, path assignments, and enrollments
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

//! Read-only records the engine consumes. They are created and mutated by
//! the admin layer; the engine only derives values from them.

/// Ingredient, meal entry, and recipe models
pub mod nutrition;
/// Path assignment and enrollment models
pub mod plan;
/// Closed measurement unit enumeration
pub mod units;

pub use nutrition::{
    ConversionOverrides, Ingredient, MealEntry, MealSlot, MeasuredAmount, NutritionPer100g,
    Recipe, RecipeIngredient,
};
pub use plan::{ContentKind, Enrollment, PathAssignment};
pub use units::Unit;
