// ABOUTME: week subcommand resolving the plan week for a start date
// ABOUTME: Week 0 means the enrollment has not started yet
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

use chrono::{Local, NaiveDate};
use coachplan::planning::resolve_enrollment_week;

pub fn run(start: NaiveDate, on: Option<NaiveDate>, max_weeks: Option<u32>) {
    let reference = on.unwrap_or_else(|| Local::now().date_naive());
    let week = resolve_enrollment_week(start, reference, max_weeks);
    println!("{week}");
}
