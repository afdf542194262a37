// ABOUTME: Core types and constants for the coachplan planning resolution engine
// ABOUTME: Foundation crate with error handling, domain models, and conversion constants
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

#![deny(unsafe_code)]

//! # Coachplan Core
//!
//! Foundation crate providing shared types and constants for the coachplan
//! planning engine. This crate changes infrequently so the engine crate can
//! compile incrementally on top of it.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the domain-classified errors
//!   (`ConversionError`, `AssignmentError`, `GenerationError`, `EnrollmentError`)
//! - **constants**: unit default table, tolerance bands, insight TTLs
//! - **models**: units, ingredients, meal entries, recipes, path assignments, enrollments

/// Unified error handling with standard error codes and domain errors
pub mod errors;

/// Engine constants organized by domain
pub mod constants;

/// Core data models (Unit, Ingredient, MealEntry, PathAssignment, Enrollment)
pub mod models;
