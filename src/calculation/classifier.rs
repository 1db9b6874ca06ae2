//! Work entry classification.
//!
//! Decides whether a work entry is a plucking record or an advance payment.
//! The decision rests on the entry's explicit advance flag only; amounts
//! never influence it.

use crate::models::{AuditWarning, EntryKind, WorkEntry};

/// The outcome of classifying an entry in strict mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// The kind the entry was classified as.
    pub kind: EntryKind,
    /// Set when the entry had no explicit advance flag.
    pub warning: Option<AuditWarning>,
}

/// Classifies a work entry.
///
/// An entry is an advance if and only if its advance flag is `Some(true)`.
/// A missing flag defaults to plucking, so a zero-kilogram entry without a
/// flag is a zero-wage plucking record.
///
/// # Examples
///
/// ```
/// use tea_payroll_engine::calculation::classify;
/// use tea_payroll_engine::models::{EntryKind, WorkEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
/// let advance = WorkEntry::advance("worker_a", date, Decimal::from(2000));
/// assert_eq!(classify(&advance), EntryKind::Advance);
///
/// let mut legacy = WorkEntry::plucking("worker_a", date, Decimal::ZERO, Decimal::ZERO);
/// legacy.is_advance = None;
/// assert_eq!(classify(&legacy), EntryKind::Plucking);
/// ```
pub fn classify(entry: &WorkEntry) -> EntryKind {
    match entry.is_advance {
        Some(true) => EntryKind::Advance,
        Some(false) | None => EntryKind::Plucking,
    }
}

/// Classifies a work entry and reports a missing advance flag.
///
/// The kind is the same as [`classify`]; the warning only surfaces the
/// defaulting so it can be shown to the user.
pub fn classify_strict(entry: &WorkEntry) -> ClassificationResult {
    let warning = entry
        .is_advance
        .is_none()
        .then(|| AuditWarning::ambiguous_classification(&entry.worker_id, entry.date));

    ClassificationResult {
        kind: classify(entry),
        warning,
    }
}
