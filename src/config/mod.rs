// ABOUTME: Engine configuration with defaults, environment overrides, and validation
// ABOUTME: Groups matching, insight, and planning settings behind a validated global instance
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

//! # Engine Configuration
//!
//! Configuration is environment-only: defaults from [`crate::constants`],
//! then `COACHPLAN_*` overrides, then validation.
//!
//! - **matching**: tolerance bands, score weights, default result limit
//! - **insights**: insight TTL, store capacity, sanitizer limits
//! - **planning**: optional week clamp
//!
//! Every engine entry point that reads configuration also accepts an explicit
//! config, so tests never depend on [`EngineConfig::global`].

/// Configuration error types
pub mod error;
/// Insight cache configuration
pub mod insights;
/// Recipe matching configuration
pub mod matching;

pub use error::ConfigError;
pub use insights::InsightConfig;
pub use matching::{MatchingConfig, ScoreWeights, ToleranceBands};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Global configuration singleton
static ENGINE_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Planning configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Clamp for resolved plan weeks; `None` leaves weeks unbounded
    pub max_weeks: Option<u32>,
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Recipe matcher settings
    pub matching: MatchingConfig,
    /// Insight cache settings
    pub insights: InsightConfig,
    /// Planner settings
    pub planning: PlanningConfig,
}

impl EngineConfig {
    /// Get the global configuration instance
    ///
    /// Falls back to defaults when the environment holds invalid overrides.
    pub fn global() -> &'static Self {
        ENGINE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load engine config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        debug!(?config, "Engine configuration loaded");
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first validation failure found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.matching.validate()?;
        self.insights.validate()?;
        if self.planning.max_weeks == Some(0) {
            return Err(ConfigError::ValueOutOfRange(
                "max_weeks must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}: '{val}'")))?;
        }
        Ok(())
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        let tolerances = &mut self.matching.tolerances;
        Self::apply_env_var(
            "COACHPLAN_MATCH_PROTEIN_TOLERANCE_PCT",
            &mut tolerances.protein_pct,
        )?;
        Self::apply_env_var(
            "COACHPLAN_MATCH_CALORIES_TOLERANCE_PCT",
            &mut tolerances.calories_pct,
        )?;
        Self::apply_env_var(
            "COACHPLAN_MATCH_CARBS_TOLERANCE_PCT",
            &mut tolerances.carbs_pct,
        )?;
        Self::apply_env_var("COACHPLAN_MATCH_FAT_TOLERANCE_PCT", &mut tolerances.fat_pct)?;
        Self::apply_env_var(
            "COACHPLAN_MATCH_PROTEIN_WEIGHT",
            &mut self.matching.weights.protein,
        )?;
        Self::apply_env_var(
            "COACHPLAN_MATCH_DEFAULT_LIMIT",
            &mut self.matching.default_limit,
        )?;

        let insights = &mut self.insights;
        Self::apply_env_var("COACHPLAN_INSIGHT_TTL_SECS", &mut insights.ttl_secs)?;
        Self::apply_env_var("COACHPLAN_INSIGHT_MAX_SENTENCES", &mut insights.max_sentences)?;
        Self::apply_env_var("COACHPLAN_INSIGHT_MAX_CHARS", &mut insights.max_chars)?;
        Self::apply_env_var("COACHPLAN_INSIGHT_MAX_ENTRIES", &mut insights.max_entries)?;

        if let Ok(val) = env::var("COACHPLAN_MAX_WEEKS") {
            let weeks = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid COACHPLAN_MAX_WEEKS: '{val}'")))?;
            self.planning.max_weeks = Some(weeks);
        }

        Ok(self)
    }
}
