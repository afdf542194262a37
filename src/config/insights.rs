// ABOUTME: Insight cache configuration covering TTL, store capacity, and text limits
// ABOUTME: Limits feed the sanitizer that post-processes generated coaching text
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::constants::insights::{
    DEFAULT_INSIGHT_MAX_ENTRIES, DEFAULT_MAX_CHARS, DEFAULT_MAX_SENTENCES, TTL_INSIGHT_SECS,
};

/// Upper bound for the insight TTL (one year)
const MAX_INSIGHT_TTL_SECS: u64 = 366 * 24 * 60 * 60;

/// Insight cache and sanitizer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Lifetime of a generated insight
    pub ttl_secs: u64,
    /// Maximum sentences kept after sanitization
    pub max_sentences: usize,
    /// Maximum characters kept after sanitization
    pub max_chars: usize,
    /// Capacity of the in-memory insight store
    pub max_entries: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            ttl_secs: TTL_INSIGHT_SECS,
            max_sentences: DEFAULT_MAX_SENTENCES,
            max_chars: DEFAULT_MAX_CHARS,
            max_entries: DEFAULT_INSIGHT_MAX_ENTRIES,
        }
    }
}

impl InsightConfig {
    /// TTL as a chrono duration
    #[must_use]
    pub fn ttl(&self) -> Duration {
        let secs = self.ttl_secs.min(MAX_INSIGHT_TTL_SECS);
        Duration::try_seconds(i64::try_from(secs).unwrap_or(i64::MAX))
            .unwrap_or_else(Duration::zero)
    }

    /// Validate TTL and limits
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` for a zero or oversized TTL and
    /// for zero limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ttl_secs == 0 || self.ttl_secs > MAX_INSIGHT_TTL_SECS {
            return Err(ConfigError::ValueOutOfRange(
                "insight TTL must be between 1 second and 366 days",
            ));
        }
        if self.max_sentences == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "insight max_sentences must be greater than zero",
            ));
        }
        if self.max_chars == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "insight max_chars must be greater than zero",
            ));
        }
        if self.max_entries == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "insight max_entries must be greater than zero",
            ));
        }
        Ok(())
    }
}
