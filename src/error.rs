//! Error types for the tea estate payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while pricing work entries and
//! rolling up estate finances.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use tea_payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "quantity_kg".to_string(),
///     message: "must not be negative (got -1)".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid input for 'quantity_kg': must not be negative (got -1)"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No standard plucking rate is configured for the given date.
    #[error("Plucking rate not found for date {date}")]
    RateNotFound {
        /// The date for which the rate was requested.
        date: NaiveDate,
    },

    /// A value supplied to a calculation was outside its valid domain.
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A reporting period was malformed.
    #[error("Invalid period: {message}")]
    InvalidPeriod {
        /// A description of what made the period invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Builds an [`EngineError::InvalidInput`] for a negative value.
    pub(crate) fn negative(field: &str, value: impl std::fmt::Display) -> Self {
        EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative (got {})", value),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
