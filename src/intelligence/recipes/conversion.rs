// ABOUTME: Unit conversion engine turning kitchen measurements into grams
// ABOUTME: Strict mode fails on unknown units; lenient mode returns warnings instead
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

//! # Unit Conversion
//!
//! Two postures for the same conversion:
//!
//! - [`convert_to_grams`] (strict) returns `ConversionError` for anything
//!   outside the closed [`Unit`] enumeration. Use it where input was already
//!   validated and a bad unit means a data bug.
//! - [`convert_to_grams_with_metadata`] (lenient) never fails. Unknown units
//!   yield `grams: None` and an `UNKNOWN_UNIT` warning so one bad row does not
//!   abort a whole slot computation.
//!
//! Resolution per unit: ingredient override, then the global default table
//! (with a `DEFAULT_CONVERSION_USED` warning). Mass units use SI factors;
//! volume units use the ingredient density when present, otherwise 1 g/ml.
//! No rounding happens here.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::units::{
    DEFAULT_GRAMS_PER_BUND, DEFAULT_GRAMS_PER_DOSE, DEFAULT_GRAMS_PER_EL,
    DEFAULT_GRAMS_PER_HAND, DEFAULT_GRAMS_PER_PRISE, DEFAULT_GRAMS_PER_SCHEIBE,
    DEFAULT_GRAMS_PER_STK, DEFAULT_GRAMS_PER_TASSE, DEFAULT_GRAMS_PER_TL, DEFAULT_G_PER_ML,
    GRAMS_PER_KG, ML_PER_LITER,
};
use crate::errors::ConversionError;
use crate::models::{ConversionOverrides, Unit};

/// Machine-readable warning codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// The unit text did not parse into a known unit
    UnknownUnit,
    /// A global default weight was used instead of an ingredient override
    DefaultConversionUsed,
    /// The amount was negative or not finite
    InvalidAmount,
}

/// Non-fatal conversion warning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionWarning {
    /// Warning code
    pub code: WarningCode,
    /// Human-readable detail
    pub message: String,
}

impl ConversionWarning {
    fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Result of a lenient conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOutcome {
    /// Grams, or `None` when the amount could not be converted
    pub grams: Option<f64>,
    /// Warnings raised along the way
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionOutcome {
    /// Whether any warning was raised
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Default gram weight of one kitchen unit; `None` for mass and volume units
#[must_use]
pub const fn default_grams_per_unit(unit: Unit) -> Option<f64> {
    match unit {
        Unit::Grams | Unit::Kilograms | Unit::Milliliters | Unit::Liters => None,
        Unit::Tablespoon => Some(DEFAULT_GRAMS_PER_EL),
        Unit::Teaspoon => Some(DEFAULT_GRAMS_PER_TL),
        Unit::Hand => Some(DEFAULT_GRAMS_PER_HAND),
        Unit::Piece => Some(DEFAULT_GRAMS_PER_STK),
        Unit::Pinch => Some(DEFAULT_GRAMS_PER_PRISE),
        Unit::Cup => Some(DEFAULT_GRAMS_PER_TASSE),
        Unit::Slice => Some(DEFAULT_GRAMS_PER_SCHEIBE),
        Unit::Bunch => Some(DEFAULT_GRAMS_PER_BUND),
        Unit::Can => Some(DEFAULT_GRAMS_PER_DOSE),
    }
}

/// Grams for a parsed unit and whether a default (non-authoritative) weight was used
#[must_use]
pub fn unit_to_grams(
    amount: f64,
    unit: Unit,
    overrides: Option<&ConversionOverrides>,
) -> (f64, bool) {
    let density = overrides.and_then(ConversionOverrides::density);
    match unit {
        Unit::Grams => (amount, false),
        Unit::Kilograms => (amount * GRAMS_PER_KG, false),
        Unit::Milliliters => (amount * density.unwrap_or(DEFAULT_G_PER_ML), false),
        Unit::Liters => (
            amount * ML_PER_LITER * density.unwrap_or(DEFAULT_G_PER_ML),
            false,
        ),
        Unit::Tablespoon
        | Unit::Teaspoon
        | Unit::Hand
        | Unit::Piece
        | Unit::Pinch
        | Unit::Cup
        | Unit::Slice
        | Unit::Bunch
        | Unit::Can => {
            if let Some(per_unit) = overrides.and_then(|o| o.grams_per_unit(unit)) {
                (amount * per_unit, false)
            } else {
                // Kitchen units always have a default weight
                let per_unit = default_grams_per_unit(unit).unwrap_or(0.0);
                (amount * per_unit, true)
            }
        }
    }
}

fn validate_amount(amount: f64) -> Result<(), ConversionError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(ConversionError::InvalidAmount { amount })
    }
}

/// Convert an amount to grams, failing on unknown units
///
/// Uses the global default table for kitchen units.
///
/// # Errors
///
/// Returns `ConversionError::UnsupportedUnit` when `unit` is outside the
/// closed enumeration and `ConversionError::InvalidAmount` for negative or
/// non-finite amounts.
///
/// # Examples
///
/// ```rust
/// use coachplan::intelligence::recipes::conversion::convert_to_grams;
///
/// assert_eq!(convert_to_grams(2.0, "kg"), Ok(2000.0));
/// assert_eq!(convert_to_grams(1.0, "EL"), Ok(15.0));
/// assert!(convert_to_grams(1.0, "bucket").is_err());
/// ```
pub fn convert_to_grams(amount: f64, unit: &str) -> Result<f64, ConversionError> {
    let parsed: Unit = unit.parse()?;
    validate_amount(amount)?;
    Ok(unit_to_grams(amount, parsed, None).0)
}

/// Convert an amount to grams, reporting problems as warnings
///
/// Never fails. Ingredient overrides take precedence over defaults.
#[must_use]
pub fn convert_to_grams_with_metadata(
    amount: f64,
    unit: &str,
    overrides: Option<&ConversionOverrides>,
) -> ConversionOutcome {
    let Some(parsed) = Unit::parse(unit) else {
        warn!(unit, "Unknown unit, amount left unconverted");
        return ConversionOutcome {
            grams: None,
            warnings: vec![ConversionWarning::new(
                WarningCode::UnknownUnit,
                format!("Unknown unit '{unit}'"),
            )],
        };
    };

    if let Err(e) = validate_amount(amount) {
        return ConversionOutcome {
            grams: None,
            warnings: vec![ConversionWarning::new(
                WarningCode::InvalidAmount,
                e.to_string(),
            )],
        };
    }

    let (grams, used_default) = unit_to_grams(amount, parsed, overrides);
    let mut warnings = Vec::new();
    if used_default {
        debug!(unit = %parsed, amount, grams, "Default conversion used");
        warnings.push(ConversionWarning::new(
            WarningCode::DefaultConversionUsed,
            format!("Default weight used for {parsed}"),
        ));
    }

    ConversionOutcome {
        grams: Some(grams),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kitchen_unit_has_a_default() {
        for unit in Unit::ALL {
            assert_eq!(
                default_grams_per_unit(unit).is_some(),
                unit.is_kitchen_measure(),
                "{unit}"
            );
        }
    }

    #[test]
    fn test_density_applies_to_liters() {
        let overrides = ConversionOverrides {
            ml_density_g_per_ml: Some(0.92),
            ..ConversionOverrides::default()
        };
        let (grams, used_default) = unit_to_grams(0.5, Unit::Liters, Some(&overrides));
        assert!((grams - 460.0).abs() < 1e-9);
        assert!(!used_default);
    }

    #[test]
    fn test_invalid_amount_strict_and_lenient() {
        assert_eq!(
            convert_to_grams(-1.0, "g"),
            Err(ConversionError::InvalidAmount { amount: -1.0 })
        );
        let outcome = convert_to_grams_with_metadata(f64::NAN, "g", None);
        assert_eq!(outcome.grams, None);
        assert_eq!(outcome.warnings[0].code, WarningCode::InvalidAmount);
    }
}
