// ABOUTME: convert subcommand printing grams and conversion warnings
// ABOUTME: Strict mode turns unknown units into a non-zero exit
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

use anyhow::{Context, Result};
use coachplan::intelligence::recipes::conversion::{
    convert_to_grams, convert_to_grams_with_metadata, ConversionOutcome,
};

use super::print_json;

pub fn run(amount: f64, unit: &str, strict: bool) -> Result<()> {
    let outcome = if strict {
        let grams = convert_to_grams(amount, unit)
            .with_context(|| format!("Cannot convert {amount} {unit}"))?;
        ConversionOutcome {
            grams: Some(grams),
            warnings: Vec::new(),
        }
    } else {
        convert_to_grams_with_metadata(amount, unit, None)
    };
    print_json(&outcome)
}
