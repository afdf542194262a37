// ABOUTME: Nutrition aggregation from ingredient amounts to per-slot macro targets
// ABOUTME: Scales per-100g macros by converted grams, zero-filling unknown values
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

//! Nutrition Aggregation
//!
//! Builds on the lenient converter: an ingredient whose unit cannot be
//! converted contributes zero and is counted as a warning, so one bad row
//! never aborts a slot.
//!
//! Every macro is scaled as `value_per_100g × grams / 100`. Unknown
//! (`None`) and non-finite macro inputs are treated as zero in the output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::recipes::conversion::{convert_to_grams_with_metadata, ConversionWarning};
use crate::models::{
    ConversionOverrides, Ingredient, MealEntry, MealSlot, MeasuredAmount, NutritionPer100g,
    RecipeIngredient,
};

/// Macros and micros for one converted ingredient amount
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledNutrition {
    /// Converted grams (zero when conversion failed)
    pub grams: f64,
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
    /// Fiber in grams
    pub fiber: f64,
    /// Sugar in grams
    pub sugar: f64,
    /// Salt in grams
    pub salt: f64,
    /// Conversion warnings raised for this amount
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ConversionWarning>,
}

impl ScaledNutrition {
    /// Whether the conversion behind this value was estimated or failed
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Aggregated macro target for one meal slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTarget {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
    /// Entries whose conversion emitted any warning
    pub warning_count: usize,
    /// `warning_count > 0`
    pub has_estimated_conversions: bool,
}

impl NutritionTarget {
    /// Target from explicit macro values with no warnings
    #[must_use]
    pub const fn from_macros(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
            warning_count: 0,
            has_estimated_conversions: false,
        }
    }

    fn accumulate(&mut self, scaled: &ScaledNutrition) {
        self.calories += scaled.calories;
        self.protein += scaled.protein;
        self.carbs += scaled.carbs;
        self.fat += scaled.fat;
        if scaled.has_warnings() {
            self.warning_count += 1;
        }
        self.has_estimated_conversions = self.warning_count > 0;
    }
}

/// Per-serving macros of a recipe derived from its ingredient rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeNutrition {
    /// Energy in kcal per serving
    pub calories: f64,
    /// Protein in grams per serving
    pub protein: f64,
    /// Carbohydrates in grams per serving
    pub carbs: f64,
    /// Fat in grams per serving
    pub fat: f64,
    /// Ingredient rows whose conversion emitted any warning
    pub warning_count: usize,
}

fn scale(per_100g: Option<f64>, grams: f64) -> f64 {
    per_100g
        .filter(|v| v.is_finite())
        .map_or(0.0, |v| v * grams / 100.0)
}

/// Scale per-100g values by an amount converted to grams
///
/// A failed conversion yields zero grams (and therefore zero macros) along
/// with its warnings.
#[must_use]
pub fn calculate_nutrition_by_100g(
    amount: f64,
    unit: &str,
    nutrition: &NutritionPer100g,
    overrides: Option<&ConversionOverrides>,
) -> ScaledNutrition {
    let outcome = convert_to_grams_with_metadata(amount, unit, overrides);
    let grams = outcome.grams.unwrap_or(0.0);

    ScaledNutrition {
        grams,
        calories: scale(nutrition.calories, grams),
        protein: scale(nutrition.protein, grams),
        carbs: scale(nutrition.carbs, grams),
        fat: scale(nutrition.fat, grams),
        fiber: scale(nutrition.fiber, grams),
        sugar: scale(nutrition.sugar, grams),
        salt: scale(nutrition.salt, grams),
        warnings: outcome.warnings,
    }
}

/// Scale an ingredient record for a measured amount, honoring its overrides
#[must_use]
pub fn calculate_ingredient_nutrition(
    measured: &MeasuredAmount,
    ingredient: &Ingredient,
) -> ScaledNutrition {
    calculate_nutrition_by_100g(
        measured.amount,
        &measured.unit,
        &ingredient.nutrition,
        Some(&ingredient.conversions),
    )
}

/// Sum the scaled macros of all entries for one slot
///
/// Entries may come from several nutrition plans active at the same time;
/// they are simply added.
#[must_use]
pub fn build_slot_nutrition_target<'a, I>(entries: I) -> NutritionTarget
where
    I: IntoIterator<Item = &'a MealEntry>,
{
    let mut target = NutritionTarget::default();
    for entry in entries {
        let scaled = calculate_ingredient_nutrition(&entry.measured, &entry.ingredient);
        if scaled.has_warnings() {
            debug!(
                slot = %entry.slot,
                ingredient = %entry.ingredient.id,
                warnings = scaled.warnings.len(),
                "Estimated or failed conversion in slot"
            );
        }
        target.accumulate(&scaled);
    }
    target
}

/// Group entries by slot and build one target per slot
///
/// Slots without entries are absent from the map; iteration runs from
/// morning to night.
#[must_use]
pub fn build_day_targets(entries: &[MealEntry]) -> BTreeMap<MealSlot, NutritionTarget> {
    let mut by_slot: BTreeMap<MealSlot, Vec<&MealEntry>> = BTreeMap::new();
    for entry in entries {
        by_slot.entry(entry.slot).or_default().push(entry);
    }
    by_slot
        .into_iter()
        .map(|(slot, slot_entries)| (slot, build_slot_nutrition_target(slot_entries)))
        .collect()
}

/// Per-serving nutrition of a recipe
///
/// Zero servings are treated as one.
#[must_use]
pub fn calculate_recipe_nutrition(
    ingredients: &[RecipeIngredient],
    servings: u32,
) -> RecipeNutrition {
    let mut total = NutritionTarget::default();
    for row in ingredients {
        total.accumulate(&calculate_ingredient_nutrition(&row.measured, &row.ingredient));
    }

    let divisor = f64::from(servings.max(1));
    RecipeNutrition {
        calories: total.calories / divisor,
        protein: total.protein / divisor,
        carbs: total.carbs / divisor,
        fat: total.fat / divisor,
        warning_count: total.warning_count,
    }
}
