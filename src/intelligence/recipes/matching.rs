// ABOUTME: Recipe matcher scoring candidate recipes against a slot macro target
// ABOUTME: Excludes out-of-tolerance candidates and ranks matches by weighted percent deviation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

//! # Recipe Matching
//!
//! For each macro the signed deviation is `(candidate - target) × 100 / target`.
//! A candidate matches only if every deviation lies within its tolerance band
//! (inclusive). Matches are scored as the weighted sum of absolute deviations
//! (lower is better) and sorted by score, then recipe id.
//!
//! A zero target macro yields a deviation of `+∞` unless the candidate is also
//! exactly zero, so such targets only match zero candidates.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, instrument};

use crate::config::{EngineConfig, MatchingConfig};
use crate::errors::{AppError, AppResult};
use crate::intelligence::nutrition_calculator::{
    calculate_recipe_nutrition, NutritionTarget, RecipeNutrition,
};
use crate::models::{MealEntry, Recipe};

/// Macro profile of a candidate recipe (per serving)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    /// Recipe identifier
    pub recipe_id: String,
    /// Display name
    pub name: String,
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
    /// Estimated or failed conversions behind these values
    #[serde(default)]
    pub warning_count: usize,
}

impl MatchCandidate {
    /// Candidate with precomputed macros
    #[must_use]
    pub fn new(
        recipe_id: impl Into<String>,
        name: impl Into<String>,
        calories: f64,
        protein: f64,
        carbs: f64,
        fat: f64,
    ) -> Self {
        Self {
            recipe_id: recipe_id.into(),
            name: name.into(),
            calories,
            protein,
            carbs,
            fat,
            warning_count: 0,
        }
    }

    /// Candidate derived from a recipe's ingredient rows
    #[must_use]
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let RecipeNutrition {
            calories,
            protein,
            carbs,
            fat,
            warning_count,
        } = calculate_recipe_nutrition(&recipe.ingredients, recipe.servings);
        Self {
            recipe_id: recipe.id.clone(),
            name: recipe.name.clone(),
            calories,
            protein,
            carbs,
            fat,
            warning_count,
        }
    }
}

/// Evaluation of one candidate against a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Recipe identifier
    pub recipe_id: String,
    /// Display name
    pub name: String,
    /// Whether every macro lies within its tolerance band
    pub is_match: bool,
    /// Weighted sum of absolute deviations (lower is better)
    pub score: f64,
    /// Signed calories deviation in percent
    pub calories_diff_percent: f64,
    /// Signed protein deviation in percent
    pub protein_diff_percent: f64,
    /// Signed carbohydrates deviation in percent
    pub carbs_diff_percent: f64,
    /// Signed fat deviation in percent
    pub fat_diff_percent: f64,
}

/// Signed percent deviation of `candidate` from `target`
#[must_use]
pub fn percent_diff(candidate: f64, target: f64) -> f64 {
    if target.abs() < f64::EPSILON {
        if candidate.abs() < f64::EPSILON {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        (candidate - target) * 100.0 / target
    }
}

fn within(diff: f64, band_pct: f64) -> bool {
    diff.abs() <= band_pct
}

/// Evaluate one candidate, including non-matches
#[must_use]
pub fn evaluate_candidate(
    target: &NutritionTarget,
    candidate: &MatchCandidate,
    config: &MatchingConfig,
) -> MatchResult {
    let calories = percent_diff(candidate.calories, target.calories);
    let protein = percent_diff(candidate.protein, target.protein);
    let carbs = percent_diff(candidate.carbs, target.carbs);
    let fat = percent_diff(candidate.fat, target.fat);

    let bands = &config.tolerances;
    let is_match = within(protein, bands.protein_pct)
        && within(calories, bands.calories_pct)
        && within(carbs, bands.carbs_pct)
        && within(fat, bands.fat_pct);

    let weights = &config.weights;
    let score = weights.calories * calories.abs()
        + weights.protein * protein.abs()
        + weights.carbs * carbs.abs()
        + weights.fat * fat.abs();

    MatchResult {
        recipe_id: candidate.recipe_id.clone(),
        name: candidate.name.clone(),
        is_match,
        score,
        calories_diff_percent: calories,
        protein_diff_percent: protein,
        carbs_diff_percent: carbs,
        fat_diff_percent: fat,
    }
}

fn rank_order(a: &MatchResult, b: &MatchResult) -> Ordering {
    a.score
        .total_cmp(&b.score)
        .then_with(|| a.recipe_id.cmp(&b.recipe_id))
}

/// Rank matching candidates using the global configuration
///
/// `limit = None` uses the configured default limit.
#[must_use]
pub fn get_slot_recipe_matches(
    target: &NutritionTarget,
    candidates: &[MatchCandidate],
    limit: Option<usize>,
) -> Vec<MatchResult> {
    get_slot_recipe_matches_with_config(
        target,
        candidates,
        limit,
        &EngineConfig::global().matching,
    )
}

/// Rank matching candidates against a target
///
/// Non-matching candidates are dropped, not down-ranked. A limit of zero
/// returns an empty list.
#[must_use]
#[instrument(skip_all, fields(candidates = candidates.len()))]
pub fn get_slot_recipe_matches_with_config(
    target: &NutritionTarget,
    candidates: &[MatchCandidate],
    limit: Option<usize>,
    config: &MatchingConfig,
) -> Vec<MatchResult> {
    let limit = limit.unwrap_or(config.default_limit);
    if limit == 0 {
        return Vec::new();
    }

    let mut matches: Vec<MatchResult> = candidates
        .iter()
        .map(|candidate| evaluate_candidate(target, candidate, config))
        .filter(|result| {
            if !result.is_match {
                debug!(recipe = %result.recipe_id, "Candidate outside tolerance");
            }
            result.is_match
        })
        .collect();

    matches.sort_by(rank_order);
    matches.truncate(limit);
    debug!(matched = matches.len(), "Recipe matching complete");
    matches
}

/// Input document for offline matching: meal entries plus candidate recipes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchDocument {
    /// Meal entries; one target is built per slot
    #[serde(default)]
    pub entries: Vec<MealEntry>,
    /// Candidate recipes
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

impl MatchDocument {
    /// Parse a document from JSON
    ///
    /// # Errors
    ///
    /// Returns a serialization error for malformed JSON
    pub fn from_reader(reader: impl Read) -> AppResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read a document from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed
    pub fn load(path: &Path) -> AppResult<Self> {
        let file = File::open(path).map_err(|e| {
            AppError::invalid_input(format!("Cannot open {}: {e}", path.display())).with_source(e)
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Candidates derived from the document's recipes
    #[must_use]
    pub fn candidates(&self) -> Vec<MatchCandidate> {
        self.recipes.iter().map(MatchCandidate::from_recipe).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_diff_zero_target() {
        assert!((percent_diff(0.0, 0.0)).abs() < f64::EPSILON);
        assert!(percent_diff(1.0, 0.0).is_infinite());
        assert!((percent_diff(33.0, 30.0) - 10.0).abs() < f64::EPSILON);
        assert!((percent_diff(27.0, 30.0) + 10.0).abs() < f64::EPSILON);
    }
}
