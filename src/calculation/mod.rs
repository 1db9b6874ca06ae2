//! Calculation logic for the payroll engine.
//!
//! This module contains the record classifier, the wage calculator for
//! individual work entries, the period aggregator (overall, per worker and
//! per day), the financial rollup of revenue, expenses and profit, and the
//! period-over-period percentage changes shown next to each figure.

mod aggregator;
mod change;
mod classifier;
mod rollup;
mod wage;

pub use aggregator::{
    aggregate, aggregate_by_day, aggregate_by_worker, price_in_period, summarize,
    summarize_by_day, summarize_by_worker,
};
pub use change::{DEFAULT_CHANGE_PRECISION, compare_rollups, percentage_change};
pub use classifier::{ClassificationResult, classify, classify_strict};
pub use rollup::{
    apply_expense_policy, monthly_rollups, rollup, rollup_with_comparison, total_bonuses,
    total_revenue,
};
pub use wage::{WageCalculation, calculate_wage, compute_amount, price_entry, validate_entry};
