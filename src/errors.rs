// ABOUTME: Error types for the planning engine, re-exported from coachplan-core
// ABOUTME: Keeps `coachplan::errors::AppError` as the single import path for callers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

//! # Error Handling
//!
//! The error types live in `coachplan-core` so that data models and the
//! engine share one `ErrorCode` table. This module re-exports them.

pub use coachplan_core::errors::{
    AppError, AppResult, AssignmentError, ConversionError, EnrollmentError, ErrorCode,
    GenerationError,
};
