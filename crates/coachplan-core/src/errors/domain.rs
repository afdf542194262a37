// ABOUTME: Domain-classified error enums for conversion, assignment, generation, and enrollment
// ABOUTME: Each converts into AppError with a dedicated ErrorCode for host-layer mapping
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

use chrono::NaiveDate;
use thiserror::Error;

use super::{AppError, ErrorCode};
use crate::models::ContentKind;

/// Strict-mode unit conversion failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Unit outside the closed unit enumeration
    #[error("Unsupported unit: '{unit}'")]
    UnsupportedUnit {
        /// Raw unit text as supplied by the caller
        unit: String,
    },
    /// Negative, NaN, or infinite amount
    #[error("Invalid amount {amount} (must be finite and non-negative)")]
    InvalidAmount {
        /// Offending amount
        amount: f64,
    },
}

impl ConversionError {
    /// Create an unsupported-unit error
    #[must_use]
    pub fn unsupported_unit(unit: impl Into<String>) -> Self {
        Self::UnsupportedUnit { unit: unit.into() }
    }
}

impl From<ConversionError> for AppError {
    fn from(error: ConversionError) -> Self {
        let code = match error {
            ConversionError::UnsupportedUnit { .. } => ErrorCode::UnsupportedUnit,
            ConversionError::InvalidAmount { .. } => ErrorCode::InvalidAmount,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

/// Assignment resolution failures
///
/// The resolver itself reports "nothing assigned" as empty results; these
/// variants are only produced by callers that require content to exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    /// No assignment of the requested kind is active in the requested week
    #[error("No {kind} assignment for path '{path_id}' in week {week}")]
    NotFound {
        /// Path identifier
        path_id: String,
        /// Requested content kind
        kind: ContentKind,
        /// Requested plan week
        week: u32,
    },
    /// The path has no assignments at all
    #[error("Path '{path_id}' is not configured")]
    NotConfigured {
        /// Path identifier
        path_id: String,
    },
}

impl From<AssignmentError> for AppError {
    fn from(error: AssignmentError) -> Self {
        Self::new(ErrorCode::AssignmentNotFound, error.to_string()).with_source(error)
    }
}

/// External text generation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The generator call failed
    #[error("Text generation failed: {reason}")]
    Failed {
        /// Failure description from the generator
        reason: String,
    },
    /// The generator returned nothing usable after sanitization
    #[error("Text generation returned an empty response")]
    EmptyResponse,
}

impl GenerationError {
    /// Create a failure from any displayable reason
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(error: GenerationError) -> Self {
        Self::new(ErrorCode::ExternalGenerationFailed, error.to_string()).with_source(error)
    }
}

/// Enrollment lifecycle violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrollmentError {
    /// Variant selection changed after the start date
    #[error("Enrollment started on {start_date} and is locked")]
    Locked {
        /// Enrollment start date
        start_date: NaiveDate,
    },
}

impl From<EnrollmentError> for AppError {
    fn from(error: EnrollmentError) -> Self {
        Self::new(ErrorCode::EnrollmentLocked, error.to_string()).with_source(error)
    }
}
