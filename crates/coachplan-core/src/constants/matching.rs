// ABOUTME: Recipe matching tolerance bands and score weights
// ABOUTME: Protein is matched more tightly than calories, carbs, and fat
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

/// Maximum absolute protein deviation in percent (inclusive)
pub const PROTEIN_TOLERANCE_PCT: f64 = 10.0;

/// Maximum absolute calorie deviation in percent (inclusive)
pub const CALORIES_TOLERANCE_PCT: f64 = 15.0;

/// Maximum absolute carbohydrate deviation in percent (inclusive)
pub const CARBS_TOLERANCE_PCT: f64 = 15.0;

/// Maximum absolute fat deviation in percent (inclusive)
pub const FAT_TOLERANCE_PCT: f64 = 15.0;

/// Score weight for protein deviation
pub const PROTEIN_SCORE_WEIGHT: f64 = 2.0;

/// Score weight for calorie, carb, and fat deviations
pub const DEFAULT_SCORE_WEIGHT: f64 = 1.0;

/// Default number of ranked matches per slot
pub const DEFAULT_MATCH_LIMIT: usize = 5;
