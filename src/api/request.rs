//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the calculation
//! endpoints and their conversion into domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::classify;
use crate::config::{ConfigLoader, RollupPolicy};
use crate::error::EngineResult;
use crate::models::{
    BonusEntry, EntryKind, ExtraWorkItem, Ledger, ReportingPeriod, SaleEntry, TenantContext,
    WorkEntry,
};

/// Request body for the `/wage` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WageRequest {
    /// The organisation making the request.
    pub tenant: TenantContext,
    /// The entry to price.
    pub entry: WorkEntryRequest,
}

/// Request body for the `/aggregate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateRequest {
    /// The organisation making the request.
    pub tenant: TenantContext,
    /// The period to aggregate.
    pub period: PeriodRequest,
    /// Work entries fetched for the period.
    #[serde(default)]
    pub entries: Vec<WorkEntryRequest>,
}

/// Request body for the `/rollup` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollupRequest {
    /// The organisation making the request.
    pub tenant: TenantContext,
    /// The period to roll up. The preceding period is derived from it.
    pub period: PeriodRequest,
    /// Work entries covering both periods.
    #[serde(default)]
    pub work_entries: Vec<WorkEntryRequest>,
    /// Sales covering both periods.
    #[serde(default)]
    pub sales: Vec<SaleEntry>,
    /// Bonuses covering both periods.
    #[serde(default)]
    pub bonuses: Vec<BonusEntry>,
    /// Overrides the configured expense rule.
    #[serde(default)]
    pub policy: Option<RollupPolicy>,
}

/// Request body for the `/rollup/monthly` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyRollupRequest {
    /// The organisation making the request.
    pub tenant: TenantContext,
    /// The calendar year to chart.
    pub year: i32,
    /// Work entries for the year.
    #[serde(default)]
    pub work_entries: Vec<WorkEntryRequest>,
    /// Sales for the year.
    #[serde(default)]
    pub sales: Vec<SaleEntry>,
    /// Bonuses for the year.
    #[serde(default)]
    pub bonuses: Vec<BonusEntry>,
    /// Overrides the configured expense rule.
    #[serde(default)]
    pub policy: Option<RollupPolicy>,
}

/// Reporting period in a request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// The first date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last date of the period (inclusive).
    pub end_date: NaiveDate,
}

/// Work entry in a request.
///
/// Identical to the stored row except that `rate_per_kg` may be omitted, in
/// which case a plucking entry takes the estate's standard rate for its date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkEntryRequest {
    /// Identifier of the worker.
    pub worker_id: String,
    /// The business date.
    pub date: NaiveDate,
    /// Explicit advance flag.
    #[serde(default)]
    pub is_advance: Option<bool>,
    /// Harvested weight in kilograms.
    #[serde(default)]
    pub quantity_kg: Decimal,
    /// Price per kilogram; the configured rate when omitted.
    #[serde(default)]
    pub rate_per_kg: Option<Decimal>,
    /// Extra work bundled into the entry.
    #[serde(default)]
    pub extra_work_items: Vec<ExtraWorkItem>,
    /// Cash advanced.
    #[serde(default)]
    pub advance_amount: Decimal,
    /// Free text.
    #[serde(default)]
    pub notes: Option<String>,
}

impl PeriodRequest {
    /// Converts into a validated reporting period.
    pub fn to_period(self) -> EngineResult<ReportingPeriod> {
        ReportingPeriod::new(self.start_date, self.end_date)
    }
}

impl WorkEntryRequest {
    /// Converts into a work entry, filling a missing plucking rate from the
    /// estate configuration.
    pub fn into_entry(self, config: &ConfigLoader) -> EngineResult<WorkEntry> {
        let mut entry = WorkEntry {
            worker_id: self.worker_id,
            date: self.date,
            is_advance: self.is_advance,
            quantity_kg: self.quantity_kg,
            rate_per_kg: Decimal::ZERO,
            extra_work_items: self.extra_work_items,
            advance_amount: self.advance_amount,
            notes: self.notes,
        };

        entry.rate_per_kg = match (self.rate_per_kg, classify(&entry)) {
            (Some(rate), _) => rate,
            (None, EntryKind::Plucking) => config.get_plucking_rate(entry.date)?,
            (None, EntryKind::Advance) => Decimal::ZERO,
        };

        Ok(entry)
    }
}

/// Converts the request entries dated within `window`, stopping at the
/// first failure.
///
/// Entries outside the window are dropped unconverted, so they never need a
/// configured rate.
pub fn into_entries(
    requests: Vec<WorkEntryRequest>,
    window: &ReportingPeriod,
    config: &ConfigLoader,
) -> EngineResult<Vec<WorkEntry>> {
    requests
        .into_iter()
        .filter(|request| window.contains_date(request.date))
        .map(|request| request.into_entry(config))
        .collect()
}

/// Assembles a ledger from the request sections, keeping the work entries
/// dated within `window`.
pub fn into_ledger(
    work_entries: Vec<WorkEntryRequest>,
    sales: Vec<SaleEntry>,
    bonuses: Vec<BonusEntry>,
    window: &ReportingPeriod,
    config: &ConfigLoader,
) -> EngineResult<Ledger> {
    Ok(Ledger {
        work_entries: into_entries(work_entries, window, config)?,
        sales,
        bonuses,
    })
}
