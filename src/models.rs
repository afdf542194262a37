// ABOUTME: Data models for ingredients, recipes, meal entries, assignments, and enrollments
// ABOUTME: Re-exported from coachplan-core so engine callers need only one crate
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

//! # Data Models
//!
//! Plain read-only records supplied by the host. The engine never mutates
//! ingredients, recipes, or assignments; enrollments only through
//! [`Enrollment::update_selection`].

pub use coachplan_core::models::{
    ContentKind, ConversionOverrides, Enrollment, Ingredient, MealEntry, MealSlot,
    MeasuredAmount, NutritionPer100g, PathAssignment, Recipe, RecipeIngredient, Unit,
};
