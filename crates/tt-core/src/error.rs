//! # AppError
//!
//! Centralized error handling for TripTogether.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// Message shown when the trip collection cannot be loaded.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch trips. Please try again later.";

/// The primary error type for all tt-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation failure (e.g., unknown category in a filter)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// The document store could not be read
    #[error("Failed to fetch trips. Please try again later.")]
    Unavailable(#[source] anyhow::Error),

    /// Infrastructure failure (e.g., session file unwritable)
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for TripTogether logic.
pub type Result<T> = std::result::Result<T, AppError>;

/// Why a stored trip document was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is malformed: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("start date is after end date")]
    InvalidDates,

    #[error("maximum group size must be positive")]
    InvalidCapacity,

    #[error("{current} members exceed the maximum group size of {max}")]
    OverCapacity { current: u32, max: u32 },
}

/// A rejected document together with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub document_id: String,
    pub error: DecodeError,
}
