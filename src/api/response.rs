//! Response types for the payroll engine API.
//!
//! This module defines the success bodies of each endpoint, the error
//! response structure, and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RollupPolicy;
use crate::error::EngineError;
use crate::models::{
    AuditStep, AuditWarning, DailyAggregate, EntryKind, MonthlyRollup, PeriodAggregate,
    PricedEntry, ReportingPeriod, RollupReport, TenantContext, WorkerPayroll,
};

/// Response body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" when the service answers.
    pub status: String,
    /// Code of the loaded estate configuration.
    pub estate: String,
}

/// Response body of `POST /wage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WageResponse {
    /// The organisation the request was made for.
    pub tenant: TenantContext,
    /// The kind the entry was classified as.
    pub kind: EntryKind,
    /// The signed amount the entry contributes to payroll.
    pub computed_amount: Decimal,
    /// The priced entry.
    pub entry: PricedEntry,
    /// How the amount was reached.
    pub audit_step: AuditStep,
    /// Classification warnings, populated in strict mode.
    pub warnings: Vec<AuditWarning>,
}

/// Response body of `POST /aggregate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResponse {
    /// The organisation the request was made for.
    pub tenant: TenantContext,
    /// The period aggregated.
    pub period: ReportingPeriod,
    /// Totals for the whole period.
    pub totals: PeriodAggregate,
    /// Totals per worker, ordered by worker id.
    pub workers: Vec<WorkerPayroll>,
    /// Totals per day with activity, ordered by date.
    pub days: Vec<DailyAggregate>,
    /// Classification warnings, populated in strict mode.
    pub warnings: Vec<AuditWarning>,
}

/// Response body of `POST /rollup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollupResponse {
    /// The organisation the request was made for.
    pub tenant: TenantContext,
    /// The expense rule applied.
    pub policy: RollupPolicy,
    /// The rollup and its comparison with the preceding period.
    #[serde(flatten)]
    pub report: RollupReport,
}

/// Response body of `POST /rollup/monthly`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyRollupResponse {
    /// The organisation the request was made for.
    pub tenant: TenantContext,
    /// The calendar year charted.
    pub year: i32,
    /// The expense rule applied.
    pub policy: RollupPolicy,
    /// One rollup per month, January first.
    pub months: Vec<MonthlyRollup>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::RateNotFound { date } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "RATE_NOT_FOUND",
                    format!("Plucking rate not found for date {}", date),
                    "Supply rate_per_kg or configure a rate effective on or before this date",
                ),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid input for '{}': {}", field, message),
                    "Quantities, rates and amounts must not be negative",
                ),
            },
            EngineError::InvalidPeriod { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_PERIOD", format!("Invalid period: {}", message)),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}
