// ABOUTME: Ingredient, meal entry, and recipe models for nutrition planning
// ABOUTME: Macros are per 100g and nullable; conversion overrides are per ingredient
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

use serde::{Deserialize, Serialize};
use std::fmt;

use super::units::Unit;

/// Nutrition values per 100 grams
///
/// `None` means unknown, never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionPer100g {
    /// Energy in kcal
    pub calories: Option<f64>,
    /// Protein in grams
    pub protein: Option<f64>,
    /// Carbohydrates in grams
    pub carbs: Option<f64>,
    /// Fat in grams
    pub fat: Option<f64>,
    /// Fiber in grams
    pub fiber: Option<f64>,
    /// Sugar in grams
    pub sugar: Option<f64>,
    /// Salt in grams
    pub salt: Option<f64>,
}

/// Authoritative per-unit gram weights supplied by an ingredient
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOverrides {
    /// Grams per Stück
    pub grams_per_piece: Option<f64>,
    /// Grams per Handvoll
    pub grams_per_hand: Option<f64>,
    /// Grams per Teelöffel
    pub grams_per_teaspoon: Option<f64>,
    /// Grams per Esslöffel
    pub grams_per_tablespoon: Option<f64>,
    /// Grams per Prise
    pub grams_per_pinch: Option<f64>,
    /// Grams per Tasse
    pub grams_per_cup: Option<f64>,
    /// Grams per Scheibe
    pub grams_per_slice: Option<f64>,
    /// Grams per Bund
    pub grams_per_bunch: Option<f64>,
    /// Grams per Dose
    pub grams_per_can: Option<f64>,
    /// Density in grams per milliliter for ML/L amounts
    pub ml_density_g_per_ml: Option<f64>,
}

impl ConversionOverrides {
    /// Override for a kitchen unit, if the ingredient supplies a usable one
    ///
    /// Mass units never have overrides; volume units use
    /// [`ConversionOverrides::density`] instead. Zero, negative, and
    /// non-finite values are ignored.
    #[must_use]
    pub fn grams_per_unit(&self, unit: Unit) -> Option<f64> {
        let value = match unit {
            Unit::Grams | Unit::Kilograms | Unit::Milliliters | Unit::Liters => None,
            Unit::Tablespoon => self.grams_per_tablespoon,
            Unit::Teaspoon => self.grams_per_teaspoon,
            Unit::Hand => self.grams_per_hand,
            Unit::Piece => self.grams_per_piece,
            Unit::Pinch => self.grams_per_pinch,
            Unit::Cup => self.grams_per_cup,
            Unit::Slice => self.grams_per_slice,
            Unit::Bunch => self.grams_per_bunch,
            Unit::Can => self.grams_per_can,
        };
        value.filter(|v| v.is_finite() && *v > 0.0)
    }

    /// Usable density in g/ml
    #[must_use]
    pub fn density(&self) -> Option<f64> {
        self.ml_density_g_per_ml
            .filter(|v| v.is_finite() && *v > 0.0)
    }
}

/// Ingredient master record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Ingredient identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Macros per 100g
    #[serde(flatten)]
    pub nutrition: NutritionPer100g,
    /// Per-unit conversion overrides
    #[serde(flatten)]
    pub conversions: ConversionOverrides,
}

impl Ingredient {
    /// Create an ingredient without macros or overrides
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            nutrition: NutritionPer100g::default(),
            conversions: ConversionOverrides::default(),
        }
    }

    /// Set macros per 100g
    #[must_use]
    pub fn with_nutrition(mut self, nutrition: NutritionPer100g) -> Self {
        self.nutrition = nutrition;
        self
    }

    /// Set conversion overrides
    #[must_use]
    pub fn with_conversions(mut self, conversions: ConversionOverrides) -> Self {
        self.conversions = conversions;
        self
    }
}

/// Amount in free-form unit text, as stored by the admin layer
///
/// The unit is parsed into [`Unit`] at conversion time so that unknown
/// units surface as warnings instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuredAmount {
    /// Quantity in `unit`
    pub amount: f64,
    /// Raw unit text
    pub unit: String,
}

impl MeasuredAmount {
    /// Create a measured amount
    #[must_use]
    pub fn new(amount: f64, unit: impl Into<String>) -> Self {
        Self {
            amount,
            unit: unit.into(),
        }
    }

    /// Parsed unit, if recognized
    #[must_use]
    pub fn parsed_unit(&self) -> Option<Unit> {
        Unit::parse(&self.unit)
    }
}

/// Meal time-of-day bucket
///
/// Ordering follows the day, so maps keyed by slot iterate morning to night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MealSlot {
    /// Breakfast
    #[serde(rename = "MORNING")]
    Morning,
    /// Mid-morning snack
    #[serde(rename = "SNACK_1")]
    Snack1,
    /// Lunch
    #[serde(rename = "LUNCH")]
    Lunch,
    /// Afternoon snack
    #[serde(rename = "SNACK_2")]
    Snack2,
    /// Dinner
    #[serde(rename = "DINNER")]
    Dinner,
    /// Late snack
    #[serde(rename = "NIGHT")]
    Night,
}

impl MealSlot {
    /// Every slot in day order
    pub const ALL: [Self; 6] = [
        Self::Morning,
        Self::Snack1,
        Self::Lunch,
        Self::Snack2,
        Self::Dinner,
        Self::Night,
    ];

    /// Canonical code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Morning => "MORNING",
            Self::Snack1 => "SNACK_1",
            Self::Lunch => "LUNCH",
            Self::Snack2 => "SNACK_2",
            Self::Dinner => "DINNER",
            Self::Night => "NIGHT",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One ingredient amount assigned to a meal slot by a nutrition plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    /// Nutrition plan (content ref) this entry belongs to
    pub nutrition_plan_id: String,
    /// Slot the entry is eaten in
    pub slot: MealSlot,
    /// Amount and raw unit
    #[serde(flatten)]
    pub measured: MeasuredAmount,
    /// Ingredient record
    pub ingredient: Ingredient,
}

impl MealEntry {
    /// Create a meal entry
    #[must_use]
    pub fn new(
        nutrition_plan_id: impl Into<String>,
        slot: MealSlot,
        measured: MeasuredAmount,
        ingredient: Ingredient,
    ) -> Self {
        Self {
            nutrition_plan_id: nutrition_plan_id.into(),
            slot,
            measured,
            ingredient,
        }
    }
}

/// One ingredient amount within a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    /// Amount and raw unit
    #[serde(flatten)]
    pub measured: MeasuredAmount,
    /// Ingredient record
    pub ingredient: Ingredient,
}

/// Recipe with its ingredient rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Recipe identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Servings the ingredient amounts yield
    pub servings: u32,
    /// Ingredient rows
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    /// Create an empty recipe
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, servings: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            servings,
            ingredients: Vec::new(),
        }
    }

    /// Add an ingredient row
    #[must_use]
    pub fn with_ingredient(mut self, measured: MeasuredAmount, ingredient: Ingredient) -> Self {
        self.ingredients.push(RecipeIngredient {
            measured,
            ingredient,
        });
        self
    }
}
