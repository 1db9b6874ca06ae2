//! Aggregate and rollup result models.
//!
//! This module contains the figures produced by the period aggregator and
//! the financial rollup, as consumed by the dashboard's tables and charts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ReportingPeriod;

/// Payroll totals over a set of work entries.
///
/// An empty period is represented by the all-zero default, not an error.
///
/// # Example
///
/// ```
/// use tea_payroll_engine::models::PeriodAggregate;
/// use rust_decimal::Decimal;
///
/// let empty = PeriodAggregate::default();
/// assert_eq!(empty.worker_count, 0);
/// assert_eq!(empty.avg_kg_per_worker, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAggregate {
    /// Kilograms harvested across plucking entries.
    pub total_kg: Decimal,
    /// Wages earned across plucking entries, extra work included.
    pub total_earned: Decimal,
    /// Cash advanced across advance entries.
    pub total_advanced: Decimal,
    /// Cash paid out across all entries.
    pub total_paid: Decimal,
    /// Distinct workers with any entry.
    pub worker_count: u32,
    /// `total_kg / worker_count`, zero when there are no workers.
    pub avg_kg_per_worker: Decimal,
}

/// Payroll position of a single worker over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerPayroll {
    /// Identifier of the worker.
    pub worker_id: String,
    /// Kilograms harvested.
    pub total_kg: Decimal,
    /// Wages earned.
    pub total_earned: Decimal,
    /// Cash advanced.
    pub total_advanced: Decimal,
    /// Earned minus advanced. Negative when advances exceed earnings.
    pub net_payable: Decimal,
    /// Number of entries counted.
    pub entry_count: u32,
}

/// Payroll totals for a single business day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAggregate {
    /// The business date.
    pub date: NaiveDate,
    /// The totals for that date.
    #[serde(flatten)]
    pub totals: PeriodAggregate,
}

/// Revenue, expenses and profit for a reporting period.
///
/// The component figures are carried alongside the result so the expense
/// rule can be checked from the output alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialRollup {
    /// Income from tea sales.
    pub revenue: Decimal,
    /// Expenses under the rollup policy in force.
    pub expenses: Decimal,
    /// `revenue - expenses`. May be negative.
    pub profit: Decimal,
    /// Wages earned by plucking in the period.
    pub total_earned: Decimal,
    /// Bonuses whose payroll month falls in the period.
    pub total_bonuses: Decimal,
    /// Advances paid in the period.
    pub total_advanced: Decimal,
    /// Kilograms harvested in the period.
    pub total_kg: Decimal,
}

/// Percentage changes of a rollup against the preceding period.
///
/// Each change is zero when its base figure is zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupChanges {
    /// Change in revenue, in percent.
    pub revenue_change: Decimal,
    /// Change in expenses, in percent.
    pub expenses_change: Decimal,
    /// Change in profit, in percent.
    pub profit_change: Decimal,
    /// Change in wages earned, in percent.
    pub earned_change: Decimal,
    /// Change in kilograms harvested, in percent.
    pub kg_change: Decimal,
}

/// A rollup together with its comparison to the preceding period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupReport {
    /// The period reported on.
    pub period: ReportingPeriod,
    /// The period compared against.
    pub previous_period: ReportingPeriod,
    /// Figures for `period`.
    pub current: FinancialRollup,
    /// Figures for `previous_period`.
    pub previous: FinancialRollup,
    /// Percentage changes from `previous` to `current`.
    pub changes: RollupChanges,
}

/// One point of the monthly profit/expense chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRollup {
    /// First day of the month.
    pub month: NaiveDate,
    /// Figures for the month.
    #[serde(flatten)]
    pub rollup: FinancialRollup,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_period_aggregate_default_is_all_zero() {
        let aggregate = PeriodAggregate::default();
        assert_eq!(aggregate.total_kg, Decimal::ZERO);
        assert_eq!(aggregate.total_earned, Decimal::ZERO);
        assert_eq!(aggregate.total_advanced, Decimal::ZERO);
        assert_eq!(aggregate.total_paid, Decimal::ZERO);
        assert_eq!(aggregate.worker_count, 0);
        assert_eq!(aggregate.avg_kg_per_worker, Decimal::ZERO);
    }

    #[test]
    fn test_daily_aggregate_flattens_totals() {
        let daily = DailyAggregate {
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            totals: PeriodAggregate {
                total_kg: dec("35.5"),
                worker_count: 2,
                ..PeriodAggregate::default()
            },
        };

        let json = serde_json::to_value(&daily).unwrap();
        assert_eq!(json["date"], "2025-03-04");
        assert_eq!(json["total_kg"], "35.5");
        assert_eq!(json["worker_count"], 2);
        assert!(json.get("totals").is_none());
    }

    #[test]
    fn test_monthly_rollup_serialization() {
        let point = MonthlyRollup {
            month: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            rollup: FinancialRollup {
                revenue: dec("100000"),
                expenses: dec("47000"),
                profit: dec("53000"),
                ..FinancialRollup::default()
            },
        };

        let json = serde_json::to_string(&point).unwrap();
        assert!(json.contains("\"month\":\"2025-03-01\""));
        assert!(json.contains("\"profit\":\"53000\""));
    }
}
