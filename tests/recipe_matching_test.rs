// ABOUTME: Integration tests for recipe matching against slot macro targets
// ABOUTME: Covers inclusive tolerance bands, exclusion, ranking, limits, and JSON documents
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::float_cmp
)]

mod common;

use coachplan::config::MatchingConfig;
use coachplan::intelligence::nutrition_calculator::{build_slot_nutrition_target, NutritionTarget};
use coachplan::intelligence::recipes::matching::{
    evaluate_candidate, get_slot_recipe_matches, get_slot_recipe_matches_with_config,
    percent_diff, MatchCandidate, MatchDocument,
};
use coachplan::models::MealSlot;
use std::io::Write;
use tempfile::NamedTempFile;

use common::{entry, ingredient, recipe_with_macros};

fn lunch_target() -> NutritionTarget {
    NutritionTarget::from_macros(600.0, 30.0, 50.0, 20.0)
}

fn candidate(id: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> MatchCandidate {
    MatchCandidate::new(id, id, calories, protein, carbs, fat)
}

// ============================================================================
// Tolerance Bands
// ============================================================================

#[test]
fn test_protein_boundary_is_inclusive() {
    common::init_test_logging();

    let result = evaluate_candidate(
        &lunch_target(),
        &candidate("exact-10", 600.0, 33.0, 50.0, 20.0),
        &MatchingConfig::default(),
    );
    assert_eq!(result.protein_diff_percent, 10.0);
    assert!(result.is_match);
}

#[test]
fn test_protein_tolerance_is_tighter_than_other_macros() {
    let result = evaluate_candidate(
        &lunch_target(),
        &candidate("protein-13", 620.0, 34.0, 51.0, 20.5),
        &MatchingConfig::default(),
    );
    assert!(result.protein_diff_percent > 13.0);
    assert!(result.calories_diff_percent.abs() <= 5.0);
    assert!(!result.is_match);

    // The same 15% deviation passes on calories
    let result = evaluate_candidate(
        &lunch_target(),
        &candidate("calories-15", 690.0, 30.0, 50.0, 20.0),
        &MatchingConfig::default(),
    );
    assert_eq!(result.calories_diff_percent, 15.0);
    assert!(result.is_match);
}

#[test]
fn test_negative_deviation_uses_absolute_value() {
    let result = evaluate_candidate(
        &lunch_target(),
        &candidate("lean", 600.0, 27.0, 50.0, 20.0),
        &MatchingConfig::default(),
    );
    assert_eq!(result.protein_diff_percent, -10.0);
    assert!(result.is_match);
}

#[test]
fn test_zero_target_macro() {
    assert_eq!(percent_diff(0.0, 0.0), 0.0);
    assert!(percent_diff(1.0, 0.0).is_infinite());

    let fat_free = NutritionTarget::from_macros(300.0, 20.0, 50.0, 0.0);
    let config = MatchingConfig::default();
    let exact = candidate("a", 300.0, 20.0, 50.0, 0.0);
    let with_fat = candidate("b", 300.0, 20.0, 50.0, 1.0);
    assert!(evaluate_candidate(&fat_free, &exact, &config).is_match);
    assert!(!evaluate_candidate(&fat_free, &with_fat, &config).is_match);
}

#[test]
fn test_custom_tolerances() {
    let mut config = MatchingConfig::default();
    config.tolerances.protein_pct = 15.0;

    let result = evaluate_candidate(
        &lunch_target(),
        &candidate("protein-13", 620.0, 34.0, 51.0, 20.5),
        &config,
    );
    assert!(result.is_match);
}

// ============================================================================
// Ranking
// ============================================================================

#[test]
fn test_out_of_tolerance_candidates_are_excluded() {
    let candidates = vec![
        candidate("in-1", 600.0, 30.0, 50.0, 20.0),
        candidate("out", 900.0, 30.0, 50.0, 20.0),
        candidate("in-2", 630.0, 31.0, 52.0, 21.0),
    ];

    let matches = get_slot_recipe_matches(&lunch_target(), &candidates, None);

    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|m| m.is_match));
    assert!(matches.iter().all(|m| m.recipe_id != "out"));
}

#[test]
fn test_ranking_by_score_with_id_tie_break() {
    let candidates = vec![
        // protein +5% weighs double: score 10
        candidate("c-protein", 600.0, 31.5, 50.0, 20.0),
        // calories +10%: score 10
        candidate("b-calories", 660.0, 30.0, 50.0, 20.0),
        candidate("a-exact", 600.0, 30.0, 50.0, 20.0),
    ];

    let matches = get_slot_recipe_matches_with_config(
        &lunch_target(),
        &candidates,
        None,
        &MatchingConfig::default(),
    );
    let order: Vec<&str> = matches.iter().map(|m| m.recipe_id.as_str()).collect();

    assert_eq!(order, vec!["a-exact", "b-calories", "c-protein"]);
    assert_eq!(matches[0].score, 0.0);
    assert_eq!(matches[1].score, matches[2].score);
}

#[test]
fn test_limit_truncates_results() {
    let candidates: Vec<MatchCandidate> = (0..8)
        .map(|i| candidate(&format!("r{i}"), 600.0 + f64::from(i), 30.0, 50.0, 20.0))
        .collect();
    let config = MatchingConfig::default();

    assert_eq!(
        get_slot_recipe_matches_with_config(&lunch_target(), &candidates, Some(3), &config).len(),
        3
    );
    assert_eq!(
        get_slot_recipe_matches_with_config(&lunch_target(), &candidates, None, &config).len(),
        config.default_limit
    );
    assert!(
        get_slot_recipe_matches_with_config(&lunch_target(), &candidates, Some(0), &config)
            .is_empty()
    );
}

#[test]
fn test_candidate_from_recipe_uses_per_serving_macros() {
    let recipe = recipe_with_macros("bowl", 600.0, 30.0, 50.0, 20.0);
    let candidate = MatchCandidate::from_recipe(&recipe);

    assert_eq!(candidate.recipe_id, "bowl");
    assert_eq!(candidate.calories, 600.0);
    assert_eq!(candidate.warning_count, 0);
}

// ============================================================================
// Match Documents
// ============================================================================

#[test]
fn test_match_document_from_file() {
    let document = MatchDocument {
        entries: vec![entry(
            "plan-1",
            MealSlot::Lunch,
            200.0,
            "g",
            ingredient("chicken-rice", 300.0, 15.0, 25.0, 10.0),
        )],
        recipes: vec![
            recipe_with_macros("match", 600.0, 30.0, 50.0, 20.0),
            recipe_with_macros("miss", 200.0, 5.0, 10.0, 2.0),
        ],
    };
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&document).unwrap().as_bytes())
        .unwrap();

    let loaded = MatchDocument::load(file.path()).unwrap();
    assert_eq!(loaded, document);

    let target = build_slot_nutrition_target(&loaded.entries);
    let matches = get_slot_recipe_matches(&target, &loaded.candidates(), None);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].recipe_id, "match");
}

#[test]
fn test_match_document_missing_file_is_an_error() {
    let result = MatchDocument::load(std::path::Path::new("/nonexistent/plan.json"));
    assert!(result.is_err());
}
