//! Audit trail models.
//!
//! Every pricing decision records an [`AuditStep`] so a payroll clerk can see
//! exactly how an amount was reached. Irregularities that do not stop a
//! calculation are reported as [`AuditWarning`]s.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
///
/// # Example
///
/// ```
/// use tea_payroll_engine::models::AuditWarning;
///
/// let warning = AuditWarning::ambiguous_classification("worker_c", "2025-03-04");
/// assert_eq!(warning.code, "AMBIGUOUS_CLASSIFICATION");
/// assert_eq!(warning.severity, "low");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Warning for an entry that carries no explicit advance flag.
    pub fn ambiguous_classification(worker_id: &str, date: impl std::fmt::Display) -> Self {
        Self {
            code: "AMBIGUOUS_CLASSIFICATION".to_string(),
            message: format!(
                "Entry for worker '{}' on {} has no advance flag; treated as plucking",
                worker_id, date
            ),
            severity: "low".to_string(),
        }
    }
}
