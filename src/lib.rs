// ABOUTME: Main library entry point for the coachplan planning resolution engine
// ABOUTME: Resolves weekly plan content, macro targets, recipe matches, and cached coaching text
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

#![deny(unsafe_code)]

//! # Coachplan
//!
//! The resolution engine behind a fitness and nutrition coaching platform.
//! Given an enrollment and a date it decides which training, nutrition and
//! info content applies, turns kitchen measurements into grams, aggregates
//! per-slot macro targets, ranks recipes against them, and caches generated
//! coaching text until its context changes.
//!
//! ## Architecture
//!
//! - **intelligence**: unit conversion, nutrition aggregation, recipe matching
//! - **planning**: week resolution, assignment resolution, weekly planner,
//!   atomic sibling reordering
//! - **cache** / **insights**: injected insight store and the hash + TTL
//!   cache decision in front of text generation
//! - **llm**: the text generation capability and an `OpenAI`-compatible client
//! - **config** / **logging**: validated engine configuration and tracing setup
//!
//! Storage is never global: plan data, insight records and sibling positions
//! are all reached through traits the host implements.
//!
//! ## Example Usage
//!
//! ```rust
//! use coachplan::intelligence::recipes::conversion::convert_to_grams_with_metadata;
//!
//! let outcome = convert_to_grams_with_metadata(2.0, "EL", None);
//! assert_eq!(outcome.grams, Some(30.0));
//! assert!(outcome.has_warnings());
//! ```

/// Unified error handling (re-exported from `coachplan-core`)
pub mod errors;

/// Engine constants (re-exported from `coachplan-core`)
pub mod constants;

/// Domain models (re-exported from `coachplan-core`)
pub mod models;

/// Validated engine configuration with environment overrides
pub mod config;

/// Structured logging setup
pub mod logging;

/// Unit conversion, nutrition aggregation, and recipe matching
pub mod intelligence;

/// Week, assignment, and weekly plan resolution
pub mod planning;

/// Insight store abstraction and in-memory backend
pub mod cache;

/// Insight cache, sanitizer, prompt, and coaching service
pub mod insights;

/// Text generation capability and chat-completion providers
pub mod llm;
