// ABOUTME: Week resolver mapping a calendar date to a 1-based plan week
// ABOUTME: Pure functions of start date, reference date, and an optional clamp
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::Enrollment;

/// Seconds per calendar day
const SECS_PER_DAY: i64 = 86_400;

/// Days per plan week
const DAYS_PER_WEEK: i64 = 7;

/// Week index for `days_since_start`, or `0` before the start
fn week_for_days(days_since_start: i64, max_weeks: Option<u32>) -> u32 {
    if days_since_start < 0 {
        return 0;
    }
    let week = u32::try_from(days_since_start / DAYS_PER_WEEK + 1).unwrap_or(u32::MAX);
    // A zero clamp would collide with the not-started sentinel
    match max_weeks {
        Some(max) if max > 0 => week.min(max),
        _ => week,
    }
}

/// Plan week for a reference date
///
/// Returns `0` before the start date. Days 0-6 are week 1, days 7-13 week 2,
/// and so on. With `max_weeks` the result is clamped to `max_weeks`.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use coachplan::planning::weeks::resolve_enrollment_week;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let day = |d| start + chrono::Days::new(d);
/// assert_eq!(resolve_enrollment_week(start, day(0), None), 1);
/// assert_eq!(resolve_enrollment_week(start, day(7), None), 2);
/// assert_eq!(resolve_enrollment_week(start, day(70), Some(8)), 8);
/// ```
#[must_use]
pub fn resolve_enrollment_week(
    start_date: NaiveDate,
    reference_date: NaiveDate,
    max_weeks: Option<u32>,
) -> u32 {
    week_for_days(
        reference_date.signed_duration_since(start_date).num_days(),
        max_weeks,
    )
}

/// Plan week for instants, flooring partial days
///
/// One second before the start is day -1 (not started), not day 0.
#[must_use]
pub fn resolve_enrollment_week_at(
    start: DateTime<Utc>,
    reference: DateTime<Utc>,
    max_weeks: Option<u32>,
) -> u32 {
    let secs = reference.signed_duration_since(start).num_seconds();
    week_for_days(secs.div_euclid(SECS_PER_DAY), max_weeks)
}

/// Current plan week of an enrollment
#[must_use]
pub fn current_enrollment_week(
    enrollment: &Enrollment,
    today: NaiveDate,
    max_weeks: Option<u32>,
) -> u32 {
    resolve_enrollment_week(enrollment.start_date, today, max_weeks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_boundaries() {
        assert_eq!(week_for_days(-1, None), 0);
        assert_eq!(week_for_days(0, None), 1);
        assert_eq!(week_for_days(6, None), 1);
        assert_eq!(week_for_days(7, None), 2);
        assert_eq!(week_for_days(13, None), 2);
        assert_eq!(week_for_days(14, None), 3);
    }

    #[test]
    fn test_zero_clamp_is_ignored() {
        assert_eq!(week_for_days(14, Some(0)), 3);
        assert_eq!(week_for_days(-3, Some(8)), 0);
    }
}
