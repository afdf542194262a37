// ABOUTME: Weekly planner composing week, assignment, aggregation, and matching steps
// ABOUTME: Storage is injected via PlanDataSource; per-slot work fans out with rayon
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

//! # Weekly Planner
//!
//! Control flow for one enrollment and reference date:
//!
//! 1. resolve the plan week from the enrollment start date
//! 2. resolve the active assignments for week and variant selection
//! 3. load meal entries of the active nutrition plans
//! 4. build one macro target per slot
//! 5. rank candidate recipes against each slot target
//!
//! Slots are independent, so steps 4 and 5 run in parallel; the output is
//! sorted by slot regardless of completion order.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, instrument};

use super::assignments::{resolve_week_content, AssignmentQuery, ResolvedWeek};
use super::weeks::current_enrollment_week;
use crate::config::EngineConfig;
use crate::errors::AppResult;
use crate::intelligence::nutrition_calculator::{build_day_targets, NutritionTarget};
use crate::intelligence::recipes::matching::{
    get_slot_recipe_matches_with_config, MatchCandidate, MatchResult,
};
use crate::models::{Enrollment, MealEntry, MealSlot, PathAssignment, Recipe};

/// Read access to the plan data a host keeps in storage
pub trait PlanDataSource: Send + Sync {
    /// Every assignment of a path
    ///
    /// # Errors
    ///
    /// Returns a storage error if the assignments cannot be loaded
    fn path_assignments(&self, path_id: &str) -> AppResult<Vec<PathAssignment>>;

    /// Meal entries belonging to the given nutrition plans
    ///
    /// # Errors
    ///
    /// Returns a storage error if the entries cannot be loaded
    fn meal_entries(&self, nutrition_plan_ids: &[String]) -> AppResult<Vec<MealEntry>>;

    /// Recipes eligible as slot matches
    ///
    /// # Errors
    ///
    /// Returns a storage error if the recipes cannot be loaded
    fn candidate_recipes(&self) -> AppResult<Vec<Recipe>>;
}

/// Plan data held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlanData {
    /// Assignments of all paths
    pub assignments: Vec<PathAssignment>,
    /// Meal entries of all nutrition plans
    pub meal_entries: Vec<MealEntry>,
    /// Candidate recipes
    pub recipes: Vec<Recipe>,
}

impl PlanDataSource for InMemoryPlanData {
    fn path_assignments(&self, path_id: &str) -> AppResult<Vec<PathAssignment>> {
        Ok(self
            .assignments
            .iter()
            .filter(|a| a.path_id == path_id)
            .cloned()
            .collect())
    }

    fn meal_entries(&self, nutrition_plan_ids: &[String]) -> AppResult<Vec<MealEntry>> {
        Ok(self
            .meal_entries
            .iter()
            .filter(|e| nutrition_plan_ids.contains(&e.nutrition_plan_id))
            .cloned()
            .collect())
    }

    fn candidate_recipes(&self) -> AppResult<Vec<Recipe>> {
        Ok(self.recipes.clone())
    }
}

/// Target and ranked matches for one slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotPlan {
    /// Meal slot
    pub slot: MealSlot,
    /// Aggregated macro target
    pub target: NutritionTarget,
    /// Matching recipes, best first
    pub matches: Vec<MatchResult>,
}

/// Resolved plan for one enrollment week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    /// Path identifier
    pub path_id: String,
    /// Plan week (0 before the start date)
    pub week: u32,
    /// Active content, or why there is none
    pub content: ResolvedWeek,
    /// Per-slot targets and matches in slot order
    pub slots: Vec<SlotPlan>,
}

/// Hashable summary of a weekly plan for insight caching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInsightContext {
    /// Path identifier
    pub path_id: String,
    /// Plan week
    pub week: u32,
    /// Active content
    pub content: ResolvedWeek,
    /// Slot targets
    pub slot_targets: BTreeMap<MealSlot, NutritionTarget>,
    /// Ranked recipe ids per slot
    pub matched_recipes: BTreeMap<MealSlot, Vec<String>>,
}

impl WeeklyPlan {
    /// Everything that can change generated coaching text for this plan
    #[must_use]
    pub fn insight_context(&self) -> PlanInsightContext {
        PlanInsightContext {
            path_id: self.path_id.clone(),
            week: self.week,
            content: self.content.clone(),
            slot_targets: self
                .slots
                .iter()
                .map(|s| (s.slot, s.target.clone()))
                .collect(),
            matched_recipes: self
                .slots
                .iter()
                .map(|s| {
                    (
                        s.slot,
                        s.matches.iter().map(|m| m.recipe_id.clone()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Plan for one slot, if the slot has entries
    #[must_use]
    pub fn slot(&self, slot: MealSlot) -> Option<&SlotPlan> {
        self.slots.iter().find(|s| s.slot == slot)
    }
}

/// Composes the engine components over an injected data source
pub struct WeeklyPlanner<D: PlanDataSource> {
    source: D,
    config: EngineConfig,
}

impl<D: PlanDataSource> WeeklyPlanner<D> {
    /// Planner using the global configuration
    #[must_use]
    pub fn new(source: D) -> Self {
        Self::with_config(source, EngineConfig::global().clone())
    }

    /// Planner with an explicit configuration
    #[must_use]
    pub const fn with_config(source: D, config: EngineConfig) -> Self {
        Self { source, config }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve the enrollment's plan for the week containing `today`
    ///
    /// # Errors
    ///
    /// Returns an error if the data source fails
    #[instrument(skip(self, enrollment), fields(path_id = %enrollment.path_id, user_id = %enrollment.user_id))]
    pub fn plan_week(&self, enrollment: &Enrollment, today: NaiveDate) -> AppResult<WeeklyPlan> {
        let week = current_enrollment_week(enrollment, today, self.config.planning.max_weeks);
        let assignments = self.source.path_assignments(&enrollment.path_id)?;
        let query = AssignmentQuery::new(
            &enrollment.path_id,
            week,
            &enrollment.selected_variant_option_ids,
        );
        let content = resolve_week_content(&assignments, &query);

        let slots = match content.content() {
            Some(refs) if !refs.nutrition.is_empty() => self.plan_slots(&refs.nutrition)?,
            _ => Vec::new(),
        };

        info!(week, slots = slots.len(), "Weekly plan built");
        Ok(WeeklyPlan {
            path_id: enrollment.path_id.clone(),
            week,
            content,
            slots,
        })
    }

    fn plan_slots(&self, nutrition_plan_ids: &[String]) -> AppResult<Vec<SlotPlan>> {
        let entries: Vec<MealEntry> = self
            .source
            .meal_entries(nutrition_plan_ids)?
            .into_iter()
            .filter(|e| nutrition_plan_ids.contains(&e.nutrition_plan_id))
            .collect();
        let targets = build_day_targets(&entries);

        let candidates: Vec<MatchCandidate> = self
            .source
            .candidate_recipes()?
            .par_iter()
            .map(MatchCandidate::from_recipe)
            .collect();

        let matching = &self.config.matching;
        let mut slots: Vec<SlotPlan> = targets
            .into_par_iter()
            .map(|(slot, target)| {
                let matches =
                    get_slot_recipe_matches_with_config(&target, &candidates, None, matching);
                SlotPlan {
                    slot,
                    target,
                    matches,
                }
            })
            .collect();
        slots.sort_by_key(|s| s.slot);
        Ok(slots)
    }
}
