// ABOUTME: match subcommand ranking recipes against per-slot targets from a JSON file
// ABOUTME: Output lists each slot with its macro target and ranked matches
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

use anyhow::{Context, Result};
use coachplan::intelligence::nutrition_calculator::build_day_targets;
use coachplan::intelligence::recipes::matching::{get_slot_recipe_matches, MatchDocument};
use coachplan::planning::SlotPlan;
use std::path::Path;
use tracing::info;

pub fn run(file: &Path, limit: Option<usize>) -> Result<()> {
    let document = MatchDocument::load(file)
        .with_context(|| format!("Failed to load match document {}", file.display()))?;
    let candidates = document.candidates();

    let slots: Vec<SlotPlan> = build_day_targets(&document.entries)
        .into_iter()
        .map(|(slot, target)| {
            let matches = get_slot_recipe_matches(&target, &candidates, limit);
            SlotPlan {
                slot,
                target,
                matches,
            }
        })
        .collect();

    info!(
        slots = slots.len(),
        candidates = candidates.len(),
        "Ranked recipes"
    );
    super::print_json(&slots)
}
