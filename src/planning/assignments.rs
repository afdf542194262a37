// ABOUTME: Assignment resolver selecting active path content for a week and variant selection
// ABOUTME: Deterministic ordering plus grouped content refs and explicit not-configured states
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

//! # Assignment Resolution
//!
//! An assignment is active when it belongs to the path, covers the week, and
//! is either variant-agnostic or restricted to a selected variant option. An
//! empty selection only ever matches variant-agnostic assignments.
//!
//! Results are sorted by [`PathAssignment::resolution_order`] (week start,
//! kind, content ref, then the remaining fields), never by input order, so
//! cache hashes built from them are stable.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::AssignmentError;
use crate::models::{ContentKind, PathAssignment};

/// Selection criteria for one enrollment week
#[derive(Debug, Clone, Copy)]
pub struct AssignmentQuery<'a> {
    /// Path identifier
    pub path_id: &'a str,
    /// Plan week (1-based; 0 means not started)
    pub week: u32,
    /// Selected variant option ids
    pub selected_variant_option_ids: &'a [String],
    /// Restrict to one content kind
    pub kind: Option<ContentKind>,
}

impl<'a> AssignmentQuery<'a> {
    /// Query across all content kinds
    #[must_use]
    pub const fn new(
        path_id: &'a str,
        week: u32,
        selected_variant_option_ids: &'a [String],
    ) -> Self {
        Self {
            path_id,
            week,
            selected_variant_option_ids,
            kind: None,
        }
    }

    /// Restrict the query to one content kind
    #[must_use]
    pub const fn with_kind(mut self, kind: ContentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Selection predicate
    #[must_use]
    pub fn selects(&self, assignment: &PathAssignment) -> bool {
        assignment.path_id == self.path_id
            && assignment.covers_week(self.week)
            && assignment.applies_to_selection(self.selected_variant_option_ids)
            && self.kind.is_none_or(|kind| assignment.kind == kind)
    }
}

/// Active assignments for an enrollment week, in deterministic order
///
/// Identical duplicate rows collapse into one.
#[must_use]
#[instrument(skip(assignments, query), fields(path_id = %query.path_id, week = query.week))]
pub fn resolve_assignments_for_enrollment_week(
    assignments: &[PathAssignment],
    query: &AssignmentQuery<'_>,
) -> Vec<PathAssignment> {
    let mut active: Vec<PathAssignment> = assignments
        .iter()
        .filter(|assignment| query.selects(assignment))
        .cloned()
        .collect();
    active.sort_by(PathAssignment::resolution_order);
    active.dedup();
    debug!(active = active.len(), "Resolved assignments");
    active
}

/// Content ref ids per kind, de-duplicated, in resolver order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRefsByKind {
    /// Training plan ids
    pub training: Vec<String>,
    /// Nutrition plan ids
    pub nutrition: Vec<String>,
    /// Info item ids
    pub info: Vec<String>,
}

impl ContentRefsByKind {
    /// Ids for one kind
    #[must_use]
    pub fn for_kind(&self, kind: ContentKind) -> &[String] {
        match kind {
            ContentKind::Training => &self.training,
            ContentKind::Nutrition => &self.nutrition,
            ContentKind::Info => &self.info,
        }
    }

    fn for_kind_mut(&mut self, kind: ContentKind) -> &mut Vec<String> {
        match kind {
            ContentKind::Training => &mut self.training,
            ContentKind::Nutrition => &mut self.nutrition,
            ContentKind::Info => &mut self.info,
        }
    }

    /// Whether no kind has any content
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.training.is_empty() && self.nutrition.is_empty() && self.info.is_empty()
    }
}

/// Group assignments into content ref ids per kind
#[must_use]
pub fn group_content_refs(assignments: &[PathAssignment]) -> ContentRefsByKind {
    let mut refs = ContentRefsByKind::default();
    for assignment in assignments {
        let ids = refs.for_kind_mut(assignment.kind);
        if !ids.contains(&assignment.content_ref_id) {
            ids.push(assignment.content_ref_id.clone());
        }
    }
    refs
}

/// Content state of a path for one week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolvedWeek {
    /// The path has no assignments at all
    NotConfigured,
    /// The enrollment has not started (week 0)
    NotStarted,
    /// Active content for the week; kinds may be empty
    Configured {
        /// Plan week
        week: u32,
        /// Content ref ids per kind
        content: ContentRefsByKind,
    },
}

impl ResolvedWeek {
    /// Content refs when configured
    #[must_use]
    pub const fn content(&self) -> Option<&ContentRefsByKind> {
        match self {
            Self::Configured { content, .. } => Some(content),
            Self::NotConfigured | Self::NotStarted => None,
        }
    }
}

fn path_is_configured(assignments: &[PathAssignment], path_id: &str) -> bool {
    assignments.iter().any(|a| a.path_id == path_id)
}

/// Resolve the week's content, reporting unconfigured paths and unstarted enrollments
#[must_use]
pub fn resolve_week_content(
    assignments: &[PathAssignment],
    query: &AssignmentQuery<'_>,
) -> ResolvedWeek {
    if !path_is_configured(assignments, query.path_id) {
        debug!(path_id = %query.path_id, "Path has no assignments");
        return ResolvedWeek::NotConfigured;
    }
    if query.week == 0 {
        return ResolvedWeek::NotStarted;
    }
    let active = resolve_assignments_for_enrollment_week(assignments, query);
    ResolvedWeek::Configured {
        week: query.week,
        content: group_content_refs(&active),
    }
}

/// First active assignment of `kind`, for callers that cannot proceed without one
///
/// # Errors
///
/// Returns `AssignmentError::NotConfigured` when the path has no assignments
/// and `AssignmentError::NotFound` when none of `kind` is active.
pub fn require_assignment(
    assignments: &[PathAssignment],
    query: &AssignmentQuery<'_>,
    kind: ContentKind,
) -> Result<PathAssignment, AssignmentError> {
    if !path_is_configured(assignments, query.path_id) {
        return Err(AssignmentError::NotConfigured {
            path_id: query.path_id.to_owned(),
        });
    }
    resolve_assignments_for_enrollment_week(assignments, &query.with_kind(kind))
        .into_iter()
        .next()
        .ok_or_else(|| AssignmentError::NotFound {
            path_id: query.path_id.to_owned(),
            kind,
            week: query.week,
        })
}
