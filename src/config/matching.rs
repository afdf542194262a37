// ABOUTME: Recipe matching configuration with tolerance bands and score weights
// ABOUTME: Protein defaults to a tighter band than calories, carbs, and fat
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

//! Recipe Matching Configuration
//!
//! The tolerance bands decide whether a candidate matches at all; the score
//! weights only order candidates that already matched.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::constants::matching::{
    CALORIES_TOLERANCE_PCT, CARBS_TOLERANCE_PCT, DEFAULT_MATCH_LIMIT, DEFAULT_SCORE_WEIGHT,
    FAT_TOLERANCE_PCT, PROTEIN_SCORE_WEIGHT, PROTEIN_TOLERANCE_PCT,
};

/// Recipe matcher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Maximum absolute percent deviation per macro
    pub tolerances: ToleranceBands,
    /// Weights combining absolute percent diffs into one score
    pub weights: ScoreWeights,
    /// Result limit when the caller supplies none
    pub default_limit: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            tolerances: ToleranceBands::default(),
            weights: ScoreWeights::default(),
            default_limit: DEFAULT_MATCH_LIMIT,
        }
    }
}

/// Inclusive tolerance bands in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToleranceBands {
    /// Calories band
    pub calories_pct: f64,
    /// Protein band
    pub protein_pct: f64,
    /// Carbohydrates band
    pub carbs_pct: f64,
    /// Fat band
    pub fat_pct: f64,
}

impl Default for ToleranceBands {
    fn default() -> Self {
        Self {
            calories_pct: CALORIES_TOLERANCE_PCT,
            protein_pct: PROTEIN_TOLERANCE_PCT,
            carbs_pct: CARBS_TOLERANCE_PCT,
            fat_pct: FAT_TOLERANCE_PCT,
        }
    }
}

impl ToleranceBands {
    fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |pct: f64| pct > 0.0 && pct <= 100.0;
        if !in_range(self.calories_pct) {
            return Err(ConfigError::InvalidRange(
                "calories tolerance must be in (0, 100]",
            ));
        }
        if !in_range(self.protein_pct) {
            return Err(ConfigError::InvalidRange(
                "protein tolerance must be in (0, 100]",
            ));
        }
        if !in_range(self.carbs_pct) {
            return Err(ConfigError::InvalidRange(
                "carbs tolerance must be in (0, 100]",
            ));
        }
        if !in_range(self.fat_pct) {
            return Err(ConfigError::InvalidRange("fat tolerance must be in (0, 100]"));
        }
        Ok(())
    }
}

/// Per-macro score weights (higher weight rewards precision on that macro)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Calories weight
    pub calories: f64,
    /// Protein weight
    pub protein: f64,
    /// Carbohydrates weight
    pub carbs: f64,
    /// Fat weight
    pub fat: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            calories: DEFAULT_SCORE_WEIGHT,
            protein: PROTEIN_SCORE_WEIGHT,
            carbs: DEFAULT_SCORE_WEIGHT,
            fat: DEFAULT_SCORE_WEIGHT,
        }
    }
}

impl ScoreWeights {
    fn validate(&self) -> Result<(), ConfigError> {
        let weights = [self.calories, self.protein, self.carbs, self.fat];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::InvalidWeights(
                "score weights must be finite and non-negative",
            ));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(ConfigError::InvalidWeights(
                "score weights must not all be zero",
            ));
        }
        Ok(())
    }
}

impl MatchingConfig {
    /// Validate bands, weights, and limit
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for out-of-range tolerances, invalid weights,
    /// or a zero default limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tolerances.validate()?;
        self.weights.validate()?;
        if self.default_limit == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "default match limit must be greater than zero",
            ));
        }
        Ok(())
    }
}
