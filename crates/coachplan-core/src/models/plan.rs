// ABOUTME: Path assignment and enrollment models for week-based plan resolution
// ABOUTME: Assignments bind content to a week range and optionally a variant option
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

use crate::errors::EnrollmentError;

/// Kind of content a path assignment refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentKind {
    /// Training plan
    Training,
    /// Nutrition plan
    Nutrition,
    /// Informational content
    Info,
}

impl ContentKind {
    /// Every kind in sort order
    pub const ALL: [Self; 3] = [Self::Training, Self::Nutrition, Self::Info];

    /// Canonical code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Training => "TRAINING",
            Self::Nutrition => "NUTRITION",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Binding of one content item to a path, a week range, and optionally a variant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathAssignment {
    /// Path the assignment belongs to
    pub path_id: String,
    /// Content kind
    pub kind: ContentKind,
    /// Referenced training plan, nutrition plan, or info item
    pub content_ref_id: String,
    /// First week (inclusive, 1-based)
    pub week_start: u32,
    /// Last week (inclusive)
    pub week_end: u32,
    /// Variant option the assignment is restricted to; `None` applies to everyone
    pub variant_option_id: Option<String>,
}

impl PathAssignment {
    /// Create a variant-agnostic assignment
    #[must_use]
    pub fn new(
        path_id: impl Into<String>,
        kind: ContentKind,
        content_ref_id: impl Into<String>,
        week_start: u32,
        week_end: u32,
    ) -> Self {
        Self {
            path_id: path_id.into(),
            kind,
            content_ref_id: content_ref_id.into(),
            week_start,
            week_end,
            variant_option_id: None,
        }
    }

    /// Restrict the assignment to a variant option
    #[must_use]
    pub fn for_variant(mut self, variant_option_id: impl Into<String>) -> Self {
        self.variant_option_id = Some(variant_option_id.into());
        self
    }

    /// Whether `week` lies within the inclusive week range
    #[must_use]
    pub const fn covers_week(&self, week: u32) -> bool {
        self.week_start <= week && week <= self.week_end
    }

    /// Whether the assignment applies to the given variant selection
    ///
    /// Variant-agnostic assignments always apply; restricted ones only when
    /// their option is selected. An empty selection matches nothing restricted.
    #[must_use]
    pub fn applies_to_selection(&self, selected_variant_option_ids: &[String]) -> bool {
        self.variant_option_id
            .as_ref()
            .is_none_or(|id| selected_variant_option_ids.contains(id))
    }

    /// Total ordering: week start, kind, content ref, then the remaining fields
    #[must_use]
    pub fn resolution_order(&self, other: &Self) -> Ordering {
        self.week_start
            .cmp(&other.week_start)
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.content_ref_id.cmp(&other.content_ref_id))
            .then_with(|| self.week_end.cmp(&other.week_end))
            .then_with(|| self.variant_option_id.cmp(&other.variant_option_id))
            .then_with(|| self.path_id.cmp(&other.path_id))
    }
}

/// A user's enrollment in a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// Enrolled user
    pub user_id: Uuid,
    /// Enrolled path
    pub path_id: String,
    /// First day of week 1
    pub start_date: NaiveDate,
    /// Chosen variant options
    pub selected_variant_option_ids: Vec<String>,
}

impl Enrollment {
    /// Create an enrollment with a normalized variant selection
    #[must_use]
    pub fn new(
        user_id: Uuid,
        path_id: impl Into<String>,
        start_date: NaiveDate,
        selected_variant_option_ids: Vec<String>,
    ) -> Self {
        Self {
            user_id,
            path_id: path_id.into(),
            start_date,
            selected_variant_option_ids: normalize_selection(selected_variant_option_ids),
        }
    }

    /// Enrollments are immutable from the start date on
    #[must_use]
    pub fn is_locked(&self, today: NaiveDate) -> bool {
        today >= self.start_date
    }

    /// Replace the variant selection before the enrollment starts
    ///
    /// # Errors
    ///
    /// Returns `EnrollmentError::Locked` once `today` has reached the start date.
    pub fn update_selection(
        &mut self,
        selected_variant_option_ids: Vec<String>,
        today: NaiveDate,
    ) -> Result<(), EnrollmentError> {
        if self.is_locked(today) {
            return Err(EnrollmentError::Locked {
                start_date: self.start_date,
            });
        }
        self.selected_variant_option_ids = normalize_selection(selected_variant_option_ids);
        Ok(())
    }
}

/// Sort and de-duplicate variant option ids
fn normalize_selection(mut ids: Vec<String>) -> Vec<String> {
    ids.sort();
    ids.dedup();
    ids
}
