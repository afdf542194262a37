// ABOUTME: Plan resolution for enrollments: weeks, assignments, weekly plans, and reordering
// ABOUTME: Storage is always injected through traits; nothing here holds global state
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

/// Active content selection per path, week, and variant selection
pub mod assignments;
/// Weekly plan orchestration
pub mod planner;
/// Atomic sibling renumbering
pub mod reorder;
/// Calendar date to plan week
pub mod weeks;

pub use assignments::{
    group_content_refs, require_assignment, resolve_assignments_for_enrollment_week,
    resolve_week_content, AssignmentQuery, ContentRefsByKind, ResolvedWeek,
};
pub use planner::{
    InMemoryPlanData, PlanDataSource, PlanInsightContext, SlotPlan, WeeklyPlan, WeeklyPlanner,
};
pub use reorder::{
    plan_move, plan_removal, InMemoryPositionStore, PositionBatch, PositionStore, PositionUpdate,
    PositionedItem,
};
pub use weeks::{current_enrollment_week, resolve_enrollment_week, resolve_enrollment_week_at};
