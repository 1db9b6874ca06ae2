//! Wage calculation for individual work entries.
//!
//! This module validates a work entry, classifies it, and computes the
//! signed amount it contributes to payroll: quantity x rate plus extra
//! work for plucking, the negated advance for advances.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, EntryKind, PricedEntry, WorkEntry, WorkLine};

use super::classify;

/// The result of pricing one entry, including the audit step.
#[derive(Debug, Clone)]
pub struct WageCalculation {
    /// The classified and priced entry.
    pub priced: PricedEntry,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Validates the fields meaningful for the entry's kind.
///
/// Negative values are rejected with [`EngineError::InvalidInput`], never
/// clamped. Fields belonging to the other kind are not inspected since they
/// play no part in the amount.
pub fn validate_entry(entry: &WorkEntry) -> EngineResult<EntryKind> {
    let kind = classify(entry);
    match kind {
        EntryKind::Plucking => {
            if entry.quantity_kg < Decimal::ZERO {
                return Err(EngineError::negative("quantity_kg", entry.quantity_kg));
            }
            if entry.rate_per_kg < Decimal::ZERO {
                return Err(EngineError::negative("rate_per_kg", entry.rate_per_kg));
            }
            for (index, item) in entry.extra_work_items.iter().enumerate() {
                if item.amount < Decimal::ZERO {
                    return Err(EngineError::negative(
                        &format!("extra_work_items[{}].amount", index),
                        item.amount,
                    ));
                }
            }
        }
        EntryKind::Advance => {
            if entry.advance_amount < Decimal::ZERO {
                return Err(EngineError::negative("advance_amount", entry.advance_amount));
            }
        }
    }
    Ok(kind)
}

/// Classifies, validates and prices a work entry.
///
/// # Examples
///
/// ```
/// use tea_payroll_engine::calculation::price_entry;
/// use tea_payroll_engine::models::{ExtraWorkItem, WorkEntry, WorkLine};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
/// let entry = WorkEntry::plucking("worker_b", date, Decimal::from(20), Decimal::from(150))
///     .with_extra_work(ExtraWorkItem::new("weeding", Decimal::from(500)));
///
/// let priced = price_entry(&entry).unwrap();
/// assert_eq!(priced.computed_amount, Decimal::from(3500));
/// assert!(matches!(priced.line, WorkLine::Plucking { .. }));
/// ```
pub fn price_entry(entry: &WorkEntry) -> EngineResult<PricedEntry> {
    let kind = validate_entry(entry)?;

    let (line, computed_amount) = match kind {
        EntryKind::Plucking => {
            let harvest = entry
                .quantity_kg
                .checked_mul(entry.rate_per_kg)
                .ok_or_else(|| overflow(entry, "quantity_kg x rate_per_kg"))?;
            let amount = entry
                .extra_work_items
                .iter()
                .try_fold(harvest, |total, item| total.checked_add(item.amount))
                .ok_or_else(|| overflow(entry, "extra work"))?;
            let line = WorkLine::Plucking {
                quantity_kg: entry.quantity_kg,
                rate_per_kg: entry.rate_per_kg,
                extra_work_items: entry.extra_work_items.clone(),
            };
            (line, amount)
        }
        EntryKind::Advance => {
            let line = WorkLine::Advance {
                amount: entry.advance_amount,
            };
            (line, -entry.advance_amount)
        }
    };

    Ok(PricedEntry {
        worker_id: entry.worker_id.clone(),
        date: entry.date,
        line,
        computed_amount,
    })
}

/// Computes the signed payroll amount of a work entry.
///
/// Positive for plucking, negative for advances.
///
/// # Examples
///
/// ```
/// use tea_payroll_engine::calculation::compute_amount;
/// use tea_payroll_engine::models::WorkEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
///
/// let plucking = WorkEntry::plucking("worker_a", date, Decimal::from_str("15.5").unwrap(), Decimal::from(150));
/// assert_eq!(compute_amount(&plucking).unwrap(), Decimal::from(2325));
///
/// let advance = WorkEntry::advance("worker_a", date, Decimal::from(2000));
/// assert_eq!(compute_amount(&advance).unwrap(), Decimal::from(-2000));
/// ```
pub fn compute_amount(entry: &WorkEntry) -> EngineResult<Decimal> {
    price_entry(entry).map(|priced| priced.computed_amount)
}

/// Prices a work entry and records the calculation as an audit step.
pub fn calculate_wage(entry: &WorkEntry, step_number: u32) -> EngineResult<WageCalculation> {
    let priced = price_entry(entry)?;

    let audit_step = match &priced.line {
        WorkLine::Plucking {
            quantity_kg,
            rate_per_kg,
            extra_work_items,
        } => {
            let extra_total = entry.extra_work_total();
            AuditStep {
                step_number,
                rule_id: "plucking_wage".to_string(),
                rule_name: "Plucking Wage".to_string(),
                input: serde_json::json!({
                    "worker_id": priced.worker_id,
                    "quantity_kg": quantity_kg.normalize().to_string(),
                    "rate_per_kg": rate_per_kg.normalize().to_string(),
                    "extra_work_items": extra_work_items.len(),
                    "extra_work_total": extra_total.normalize().to_string()
                }),
                output: serde_json::json!({
                    "kind": "plucking",
                    "computed_amount": priced.computed_amount.normalize().to_string()
                }),
                reasoning: format!(
                    "{} kg x {} + {} extra work = {}",
                    quantity_kg.normalize(),
                    rate_per_kg.normalize(),
                    extra_total.normalize(),
                    priced.computed_amount.normalize()
                ),
            }
        }
        WorkLine::Advance { amount } => AuditStep {
            step_number,
            rule_id: "advance_deduction".to_string(),
            rule_name: "Advance Deduction".to_string(),
            input: serde_json::json!({
                "worker_id": priced.worker_id,
                "advance_amount": amount.normalize().to_string()
            }),
            output: serde_json::json!({
                "kind": "advance",
                "computed_amount": priced.computed_amount.normalize().to_string()
            }),
            reasoning: format!(
                "Advance of {} recorded as {} against future payroll",
                amount.normalize(),
                priced.computed_amount.normalize()
            ),
        },
    };

    Ok(WageCalculation { priced, audit_step })
}

fn overflow(entry: &WorkEntry, what: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!(
            "decimal overflow computing {} for worker '{}' on {}",
            what, entry.worker_id, entry.date
        ),
    }
}
