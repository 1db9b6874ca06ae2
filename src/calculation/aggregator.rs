//! Period aggregation of work entries.
//!
//! This module sums harvested quantity, wages and advances over a reporting
//! period, keeping earnings and advances apart. Results never depend on the
//! order entries are supplied in.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    DailyAggregate, EntryKind, PeriodAggregate, PricedEntry, ReportingPeriod, WorkEntry,
    WorkerPayroll,
};

use super::price_entry;

/// Aggregates the work entries dated within a period.
///
/// Entries outside the period are skipped without validation. Any entry in
/// the period that fails validation fails the whole aggregation, so a
/// partial total is never returned.
///
/// # Examples
///
/// ```
/// use tea_payroll_engine::calculation::aggregate;
/// use tea_payroll_engine::models::{ExtraWorkItem, ReportingPeriod, WorkEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
/// let entries = vec![
///     WorkEntry::plucking("worker_a", date, Decimal::from_str("15.5").unwrap(), Decimal::from(150)),
///     WorkEntry::plucking("worker_b", date, Decimal::from(20), Decimal::from(150))
///         .with_extra_work(ExtraWorkItem::new("weeding", Decimal::from(500))),
///     WorkEntry::advance("worker_a", date, Decimal::from(2000)),
/// ];
///
/// let period = ReportingPeriod::new(date, date).unwrap();
/// let totals = aggregate(&entries, &period).unwrap();
///
/// assert_eq!(totals.total_kg, Decimal::from_str("35.5").unwrap());
/// assert_eq!(totals.total_earned, Decimal::from(5825));
/// assert_eq!(totals.total_advanced, Decimal::from(2000));
/// assert_eq!(totals.total_paid, Decimal::from(7825));
/// assert_eq!(totals.worker_count, 2);
/// assert_eq!(totals.avg_kg_per_worker, Decimal::from_str("17.75").unwrap());
/// ```
pub fn aggregate(entries: &[WorkEntry], period: &ReportingPeriod) -> EngineResult<PeriodAggregate> {
    let priced = price_in_period(entries, period)?;
    summarize(&priced)
}

/// Aggregates the entries of a period per worker, ordered by worker id.
pub fn aggregate_by_worker(
    entries: &[WorkEntry],
    period: &ReportingPeriod,
) -> EngineResult<Vec<WorkerPayroll>> {
    summarize_by_worker(&price_in_period(entries, period)?)
}

/// Aggregates the entries of a period per business day, ordered by date.
///
/// Days without entries are omitted.
pub fn aggregate_by_day(
    entries: &[WorkEntry],
    period: &ReportingPeriod,
) -> EngineResult<Vec<DailyAggregate>> {
    summarize_by_day(&price_in_period(entries, period)?)
}

/// Groups already priced entries per worker, ordered by worker id.
pub fn summarize_by_worker(priced: &[PricedEntry]) -> EngineResult<Vec<WorkerPayroll>> {
    let mut by_worker: BTreeMap<&str, Vec<&PricedEntry>> = BTreeMap::new();
    for entry in priced {
        by_worker.entry(entry.worker_id.as_str()).or_default().push(entry);
    }

    by_worker
        .into_iter()
        .map(|(worker_id, entries)| -> EngineResult<WorkerPayroll> {
            let totals = summarize(entries.iter().copied())?;
            let net_payable = totals
                .total_earned
                .checked_sub(totals.total_advanced)
                .ok_or_else(|| overflow("net_payable"))?;
            Ok(WorkerPayroll {
                worker_id: worker_id.to_string(),
                total_kg: totals.total_kg,
                total_earned: totals.total_earned,
                total_advanced: totals.total_advanced,
                net_payable,
                entry_count: count(entries.len())?,
            })
        })
        .collect()
}

/// Groups already priced entries per business day, ordered by date.
pub fn summarize_by_day(priced: &[PricedEntry]) -> EngineResult<Vec<DailyAggregate>> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&PricedEntry>> = BTreeMap::new();
    for entry in priced {
        by_day.entry(entry.date).or_default().push(entry);
    }

    by_day
        .into_iter()
        .map(|(date, entries)| -> EngineResult<DailyAggregate> {
            Ok(DailyAggregate {
                date,
                totals: summarize(entries.iter().copied())?,
            })
        })
        .collect()
}

/// Sums already priced entries into period totals.
pub fn summarize<'a>(
    priced: impl IntoIterator<Item = &'a PricedEntry>,
) -> EngineResult<PeriodAggregate> {
    let mut totals = PeriodAggregate::default();
    let mut workers = BTreeSet::new();

    for entry in priced {
        workers.insert(entry.worker_id.as_str());
        match entry.kind() {
            EntryKind::Plucking => {
                totals.total_kg = checked_add(totals.total_kg, entry.quantity_kg(), "total_kg")?;
                totals.total_earned =
                    checked_add(totals.total_earned, entry.computed_amount, "total_earned")?;
            }
            EntryKind::Advance => {
                totals.total_advanced =
                    checked_add(totals.total_advanced, entry.amount_paid(), "total_advanced")?;
            }
        }
        totals.total_paid = checked_add(totals.total_paid, entry.amount_paid(), "total_paid")?;
    }

    totals.worker_count = count(workers.len())?;
    if totals.worker_count > 0 {
        totals.avg_kg_per_worker = totals.total_kg / Decimal::from(totals.worker_count);
    }

    Ok(totals)
}

/// Prices every entry dated within the period.
///
/// Entries outside the period are skipped without validation.
pub fn price_in_period(
    entries: &[WorkEntry],
    period: &ReportingPeriod,
) -> EngineResult<Vec<PricedEntry>> {
    entries
        .iter()
        .filter(|entry| period.contains_date(entry.date))
        .map(price_entry)
        .collect()
}

pub(crate) fn checked_add(total: Decimal, value: Decimal, figure: &str) -> EngineResult<Decimal> {
    total.checked_add(value).ok_or_else(|| overflow(figure))
}

fn overflow(figure: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("decimal overflow summing {}", figure),
    }
}

fn count(len: usize) -> EngineResult<u32> {
    u32::try_from(len).map_err(|_| EngineError::CalculationError {
        message: format!("{} exceeds the countable range", len),
    })
}
