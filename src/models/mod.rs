//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod ledger;
mod reporting_period;
mod sale_entry;
mod summary;
mod work_entry;

pub use audit::{AuditStep, AuditWarning};
pub use ledger::{Ledger, TenantContext};
pub use reporting_period::ReportingPeriod;
pub use sale_entry::{BonusEntry, SaleEntry};
pub use summary::{
    DailyAggregate, FinancialRollup, MonthlyRollup, PeriodAggregate, RollupChanges, RollupReport,
    WorkerPayroll,
};
pub use work_entry::{EntryKind, ExtraWorkItem, PricedEntry, WorkEntry, WorkLine};
