// ABOUTME: Engine constants organized by domain
// ABOUTME: Unit default table, matching tolerance bands, and insight cache limits
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

/// Kitchen-unit default gram weights and SI factors
pub mod units;

/// Recipe matching tolerance bands and score weights
pub mod matching;

/// Insight cache TTL and sanitization limits
pub mod insights;
