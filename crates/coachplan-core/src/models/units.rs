// ABOUTME: Closed measurement unit enumeration with tolerant text parsing
// ABOUTME: Folds case, whitespace, and diacritics before matching canonical codes and aliases
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::errors::ConversionError;

/// Measurement unit for ingredient amounts
///
/// The set is closed: anything that does not parse into one of these
/// variants is an unknown unit. Serialized as the canonical upper-case code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    /// Grams (G), the canonical mass basis
    Grams,
    /// Kilograms (KG)
    Kilograms,
    /// Milliliters (ML)
    Milliliters,
    /// Liters (L)
    Liters,
    /// Esslöffel (EL), tablespoon
    Tablespoon,
    /// Teelöffel (TL), teaspoon
    Teaspoon,
    /// Handvoll (HAND)
    Hand,
    /// Stück (STK), one piece
    Piece,
    /// Prise (PRISE), pinch
    Pinch,
    /// Tasse (TASSE), cup
    Cup,
    /// Scheibe (SCHEIBE), slice
    Slice,
    /// Bund (BUND), bunch
    Bunch,
    /// Dose (DOSE), can
    Can,
}

impl Unit {
    /// Every unit, in canonical order
    pub const ALL: [Self; 13] = [
        Self::Grams,
        Self::Kilograms,
        Self::Milliliters,
        Self::Liters,
        Self::Tablespoon,
        Self::Teaspoon,
        Self::Hand,
        Self::Piece,
        Self::Pinch,
        Self::Cup,
        Self::Slice,
        Self::Bunch,
        Self::Can,
    ];

    /// Canonical upper-case code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Grams => "G",
            Self::Kilograms => "KG",
            Self::Milliliters => "ML",
            Self::Liters => "L",
            Self::Tablespoon => "EL",
            Self::Teaspoon => "TL",
            Self::Hand => "HAND",
            Self::Piece => "STK",
            Self::Pinch => "PRISE",
            Self::Cup => "TASSE",
            Self::Slice => "SCHEIBE",
            Self::Bunch => "BUND",
            Self::Can => "DOSE",
        }
    }

    /// Mass units convert with fixed SI factors
    #[must_use]
    pub const fn is_mass(&self) -> bool {
        matches!(self, Self::Grams | Self::Kilograms)
    }

    /// Volume units convert through density
    #[must_use]
    pub const fn is_volume(&self) -> bool {
        matches!(self, Self::Milliliters | Self::Liters)
    }

    /// Kitchen units convert through per-ingredient overrides or defaults
    #[must_use]
    pub const fn is_kitchen_measure(&self) -> bool {
        !self.is_mass() && !self.is_volume()
    }

    /// Parse free-form unit text
    ///
    /// Case, surrounding whitespace, a trailing period, and diacritics are
    /// ignored, so `"  stÜck  "`, `"Stk."`, and `"STUECK"` all yield
    /// [`Unit::Piece`].
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let unit = match normalize_unit_text(raw).as_str() {
            "g" | "gr" | "gramm" | "gram" | "grams" => Self::Grams,
            "kg" | "kilo" | "kilogramm" | "kilogram" => Self::Kilograms,
            "ml" | "milliliter" | "millilitre" => Self::Milliliters,
            "l" | "liter" | "litre" => Self::Liters,
            "el" | "essloffel" | "essl" | "tbsp" | "tablespoon" => Self::Tablespoon,
            "tl" | "teeloffel" | "teel" | "tsp" | "teaspoon" => Self::Teaspoon,
            "hand" | "handvoll" | "handful" => Self::Hand,
            "stk" | "stuck" | "stueck" | "piece" | "pc" | "pcs" => Self::Piece,
            "prise" | "prisen" | "pinch" => Self::Pinch,
            "tasse" | "tassen" | "cup" => Self::Cup,
            "scheibe" | "scheiben" | "slice" => Self::Slice,
            "bund" | "bunch" => Self::Bunch,
            "dose" | "dosen" | "can" => Self::Can,
            _ => return None,
        };
        Some(unit)
    }
}

/// Lowercase, trim, strip a trailing period, and fold diacritics
fn normalize_unit_text(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('.').trim_end();
    let mut folded = String::with_capacity(trimmed.len());
    for c in trimmed.nfd().filter(|c| !is_combining_mark(*c)) {
        if c == 'ß' {
            folded.push_str("ss");
        } else {
            folded.extend(c.to_lowercase());
        }
    }
    folded
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Unit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ConversionError::unsupported_unit(s))
    }
}

impl TryFrom<String> for Unit {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.code().to_owned()
    }
}
