// ABOUTME: Criterion benchmarks for unit conversion, slot aggregation, and recipe ranking
// ABOUTME: Measures the per-week hot path of the planner over synthetic meal and recipe sets
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

//! Criterion benchmarks for the nutrition pipeline.
//!
//! Measures kitchen-unit conversion, per-slot target aggregation, and
//! ranking of candidate recipes against a slot target.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use coachplan::intelligence::nutrition_calculator::{build_day_targets, NutritionTarget};
use coachplan::intelligence::recipes::conversion::convert_to_grams_with_metadata;
use coachplan::intelligence::recipes::matching::{get_slot_recipe_matches, MatchCandidate};
use coachplan::models::{Ingredient, MealEntry, MealSlot, MeasuredAmount, NutritionPer100g, Recipe};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const SLOTS: [MealSlot; 6] = [
    MealSlot::Morning,
    MealSlot::Snack1,
    MealSlot::Lunch,
    MealSlot::Snack2,
    MealSlot::Dinner,
    MealSlot::Night,
];

const UNITS: [&str; 5] = ["g", "EL", "TL", "Stück", "ml"];

fn ingredient(index: usize) -> Ingredient {
    let scale = (index % 17) as f64;
    Ingredient::new(format!("ing-{index}"), format!("Ingredient {index}")).with_nutrition(
        NutritionPer100g {
            calories: Some(scale.mul_add(20.0, 80.0)),
            protein: Some(scale.mul_add(1.5, 2.0)),
            carbs: Some(scale.mul_add(3.0, 5.0)),
            fat: Some(scale.mul_add(0.8, 1.0)),
            ..NutritionPer100g::default()
        },
    )
}

fn generate_entries(count: usize) -> Vec<MealEntry> {
    (0..count)
        .map(|index| {
            let grams = ((index * 37) % 250) as f64 + 10.0;
            MealEntry::new(
                "bench-plan",
                SLOTS[index % SLOTS.len()],
                MeasuredAmount::new(grams, UNITS[index % UNITS.len()]),
                ingredient(index),
            )
        })
        .collect()
}

fn generate_candidates(count: usize) -> Vec<MatchCandidate> {
    (0..count)
        .map(|index| {
            let recipe = Recipe::new(format!("recipe-{index}"), format!("Recipe {index}"), 2)
                .with_ingredient(MeasuredAmount::new(200.0, "g"), ingredient(index))
                .with_ingredient(MeasuredAmount::new(2.0, "EL"), ingredient(index + 3));
            MatchCandidate::from_recipe(&recipe)
        })
        .collect()
}

/// Benchmark single-amount conversion across unit aliases
fn bench_unit_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("unit_conversion");

    for unit in ["g", "EL", "Esslöffel", "Stk.", "Bund", "unknown"] {
        group.bench_with_input(BenchmarkId::new("convert", unit), &unit, |b, unit| {
            b.iter(|| convert_to_grams_with_metadata(black_box(2.0), black_box(unit), None));
        });
    }

    group.finish();
}

/// Benchmark aggregation of a plan's entries into slot targets
fn bench_slot_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("slot_aggregation");

    for count in [12, 60, 300] {
        let entries = generate_entries(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("build_day_targets", count), &entries, |b, e| {
            b.iter(|| build_day_targets(black_box(e)));
        });
    }

    group.finish();
}

/// Benchmark ranking candidate recipes against one slot target
fn bench_recipe_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let target = NutritionTarget::from_macros(450.0, 22.0, 45.0, 14.0);

    for count in [50, 200, 800] {
        let candidates = generate_candidates(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("get_slot_recipe_matches", count),
            &candidates,
            |b, candidates| {
                b.iter(|| get_slot_recipe_matches(black_box(&target), black_box(candidates), None));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_unit_conversion,
    bench_slot_aggregation,
    bench_recipe_ranking
);
criterion_main!(benches);
