// ABOUTME: Default gram weights for kitchen units and SI conversion factors
// ABOUTME: Used when an ingredient supplies no authoritative per-unit override
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

/// Grams per kilogram
pub const GRAMS_PER_KG: f64 = 1000.0;

/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;

/// Grams per milliliter when no ingredient density is known (water)
pub const DEFAULT_G_PER_ML: f64 = 1.0;

/// Esslöffel (tablespoon)
pub const DEFAULT_GRAMS_PER_EL: f64 = 15.0;

/// Teelöffel (teaspoon)
pub const DEFAULT_GRAMS_PER_TL: f64 = 5.0;

/// One hand (Handvoll)
pub const DEFAULT_GRAMS_PER_HAND: f64 = 50.0;

/// One piece (Stück)
pub const DEFAULT_GRAMS_PER_STK: f64 = 100.0;

/// One pinch (Prise)
pub const DEFAULT_GRAMS_PER_PRISE: f64 = 0.5;

/// One cup (Tasse), 240 ml of water
pub const DEFAULT_GRAMS_PER_TASSE: f64 = 240.0;

/// One slice (Scheibe), a bread slice
pub const DEFAULT_GRAMS_PER_SCHEIBE: f64 = 30.0;

/// One bunch (Bund) of herbs or greens
pub const DEFAULT_GRAMS_PER_BUND: f64 = 50.0;

/// One can (Dose), drained standard can
pub const DEFAULT_GRAMS_PER_DOSE: f64 = 400.0;
