// ABOUTME: Insight cache TTL, capacity, and sanitization limits
// ABOUTME: Generated coaching text is reused for a week unless its context changes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

/// Insight record lifetime (7 days)
pub const TTL_INSIGHT_SECS: u64 = 604_800;

/// Maximum insight records kept by the in-memory store
pub const DEFAULT_INSIGHT_MAX_ENTRIES: usize = 10_000;

/// Maximum sentences kept after sanitization
pub const DEFAULT_MAX_SENTENCES: usize = 4;

/// Maximum characters kept after sanitization
pub const DEFAULT_MAX_CHARS: usize = 600;

/// Insight key of the weekly coaching summary
pub const WEEKLY_SUMMARY_KEY: &str = "weekly_summary";
