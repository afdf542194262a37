// ABOUTME: Nutrition intelligence for the planning engine
// ABOUTME: Unit conversion, slot target aggregation, and recipe matching
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

//! # Intelligence Module
//!
//! Pure computations over ingredient and recipe data. Dependency order:
//! conversion, then aggregation, then matching.

/// Slot target and recipe nutrition aggregation
pub mod nutrition_calculator;
/// Unit conversion and recipe matching
pub mod recipes;

pub use nutrition_calculator::{
    build_day_targets, build_slot_nutrition_target, calculate_ingredient_nutrition,
    calculate_nutrition_by_100g, calculate_recipe_nutrition, NutritionTarget, RecipeNutrition,
    ScaledNutrition,
};
pub use recipes::conversion::{
    convert_to_grams, convert_to_grams_with_metadata, ConversionOutcome, ConversionWarning,
    WarningCode,
};
pub use recipes::matching::{
    evaluate_candidate, get_slot_recipe_matches, get_slot_recipe_matches_with_config,
    MatchCandidate, MatchDocument, MatchResult,
};
