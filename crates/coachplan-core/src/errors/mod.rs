// ABOUTME: Unified error handling with standard error codes for the planning engine
// ABOUTME: Defines AppError, ErrorCode, and re-exports the domain-classified error enums
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

//! # Unified Error Handling
//!
//! Every fallible engine operation either returns one of the domain errors in
//! [`domain`] or an [`AppError`] carrying a stable [`ErrorCode`]. Host layers
//! (HTTP handlers, admin tools) map codes to responses without matching on
//! message strings.

/// Domain-classified errors (conversion, assignment, generation, enrollment)
pub mod domain;

pub use domain::{AssignmentError, ConversionError, EnrollmentError, GenerationError};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input failed validation
    InvalidInput = 3000,
    /// Unit outside the closed unit enumeration
    UnsupportedUnit = 3001,
    /// Negative or non-finite amount
    InvalidAmount = 3002,

    // Resources (4000-4999)
    /// Requested resource does not exist
    ResourceNotFound = 4000,
    /// No assignment matches the requested path/kind/week
    AssignmentNotFound = 4001,
    /// Enrollment can no longer be modified
    EnrollmentLocked = 4002,

    // External services (5000-5999)
    /// Text generation failed or returned unusable output
    ExternalGenerationFailed = 5000,
    /// Generic external service failure (HTTP, transport)
    ExternalServiceError = 5001,

    // Configuration (6000-6999)
    /// Configuration values are invalid
    ConfigInvalid = 6000,

    // Internal (9000-9999)
    /// Unexpected internal failure
    InternalError = 9000,
    /// Injected storage failed
    StorageError = 9001,
    /// Serialization or deserialization failed
    SerializationError = 9002,
}

impl ErrorCode {
    /// HTTP status a host layer should use for this code
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput | Self::UnsupportedUnit | Self::InvalidAmount => 400,
            Self::ResourceNotFound | Self::AssignmentNotFound => 404,
            Self::EnrollmentLocked => 409,
            Self::ExternalGenerationFailed | Self::ExternalServiceError => 502,
            Self::ConfigInvalid
            | Self::InternalError
            | Self::StorageError
            | Self::SerializationError => 500,
        }
    }

    /// User-facing description of this code
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::UnsupportedUnit => "The measurement unit is not supported",
            Self::InvalidAmount => "The amount must be a finite, non-negative number",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::AssignmentNotFound => "No plan content is assigned for this week",
            Self::EnrollmentLocked => "The enrollment has started and can no longer be changed",
            Self::ExternalGenerationFailed => "Text generation failed",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// HTTP status for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Storage failure
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Serialization failure
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Configuration failure
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal failure
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// External service failure
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
