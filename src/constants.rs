// ABOUTME: Engine constants re-exported from coachplan-core
// ABOUTME: Unit default weights, matching tolerances, and insight cache limits
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

//! # Constants
//!
//! Compile-time defaults. Anything tunable at runtime is surfaced through
//! [`crate::config::EngineConfig`], which starts from these values.

pub use coachplan_core::constants::{insights, matching, units};
