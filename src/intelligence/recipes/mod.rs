// ABOUTME: Recipe-side nutrition tools: kitchen unit conversion and recipe matching
// ABOUTME: Conversion has strict and lenient postures; matching builds on the lenient one
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

/// Amount and unit to grams
pub mod conversion;
/// Candidate scoring and ranking against a macro target
pub mod matching;
