//! Financial rollup of an estate's ledger.
//!
//! This module combines the payroll aggregate of a period with tea sales and
//! bonuses into revenue, expenses and profit. The expense rule is applied in
//! exactly one place, [`apply_expense_policy`], driven by [`RollupPolicy`].

use rust_decimal::Decimal;

use crate::config::RollupPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BonusEntry, FinancialRollup, Ledger, MonthlyRollup, ReportingPeriod, RollupReport, SaleEntry,
};

use super::aggregator::checked_add;
use super::{aggregate, compare_rollups};

/// Income from all sales dated within the period.
pub fn total_revenue(sales: &[SaleEntry], period: &ReportingPeriod) -> EngineResult<Decimal> {
    sales
        .iter()
        .filter(|sale| period.contains_date(sale.date))
        .try_fold(Decimal::ZERO, |total, sale| {
            checked_add(total, sale.income()?, "revenue")
        })
}

/// Sum of bonuses whose payroll month falls within the period.
///
/// A bonus belongs to the first day of its month, even if stored mid-month.
pub fn total_bonuses(bonuses: &[BonusEntry], period: &ReportingPeriod) -> EngineResult<Decimal> {
    bonuses
        .iter()
        .filter(|bonus| period.contains_date(bonus.payroll_month()))
        .try_fold(Decimal::ZERO, |total, bonus| {
            checked_add(total, bonus.checked_amount()?, "bonuses")
        })
}

/// Applies the expense rule to a period's components.
///
/// With the default policy expenses are `earned + bonuses - advances`:
/// advances are prepayments against future earnings, so they reduce the
/// period's net cash expense rather than adding a distinct cost.
///
/// # Examples
///
/// ```
/// use tea_payroll_engine::calculation::apply_expense_policy;
/// use tea_payroll_engine::config::RollupPolicy;
/// use rust_decimal::Decimal;
///
/// let expenses = apply_expense_policy(
///     Decimal::from(50_000),
///     Decimal::from(5_000),
///     Decimal::from(8_000),
///     &RollupPolicy::default(),
/// ).unwrap();
/// assert_eq!(expenses, Decimal::from(47_000));
///
/// let earnings_only = RollupPolicy { include_bonuses: false, deduct_advances: false };
/// let expenses = apply_expense_policy(
///     Decimal::from(50_000),
///     Decimal::from(5_000),
///     Decimal::from(8_000),
///     &earnings_only,
/// ).unwrap();
/// assert_eq!(expenses, Decimal::from(50_000));
/// ```
pub fn apply_expense_policy(
    total_earned: Decimal,
    total_bonuses: Decimal,
    total_advanced: Decimal,
    policy: &RollupPolicy,
) -> EngineResult<Decimal> {
    let mut expenses = total_earned;
    if policy.include_bonuses {
        expenses = checked_add(expenses, total_bonuses, "expenses")?;
    }
    if policy.deduct_advances {
        expenses = expenses
            .checked_sub(total_advanced)
            .ok_or_else(|| EngineError::CalculationError {
                message: "decimal overflow deducting advances from expenses".to_string(),
            })?;
    }
    Ok(expenses)
}

/// Rolls up revenue, expenses and profit for a period.
///
/// # Examples
///
/// ```
/// use tea_payroll_engine::calculation::rollup;
/// use tea_payroll_engine::config::RollupPolicy;
/// use tea_payroll_engine::models::{BonusEntry, Ledger, ReportingPeriod, SaleEntry, WorkEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let ledger = Ledger {
///     work_entries: vec![
///         WorkEntry::plucking("worker_a", date, Decimal::from(500), Decimal::from(100)),
///         WorkEntry::advance("worker_a", date, Decimal::from(8_000)),
///     ],
///     sales: vec![SaleEntry {
///         date,
///         quantity_kg: Decimal::from(400),
///         rate_per_kg: Decimal::from(250),
///         total_income: None,
///         buyer: None,
///     }],
///     bonuses: vec![BonusEntry {
///         month: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///         amount: Decimal::from(5_000),
///         worker_id: None,
///         notes: None,
///     }],
/// };
///
/// let march = ReportingPeriod::month(2025, 3).unwrap();
/// let result = rollup(&ledger, &march, &RollupPolicy::default()).unwrap();
///
/// assert_eq!(result.revenue, Decimal::from(100_000));
/// assert_eq!(result.expenses, Decimal::from(47_000));
/// assert_eq!(result.profit, Decimal::from(53_000));
/// ```
pub fn rollup(
    ledger: &Ledger,
    period: &ReportingPeriod,
    policy: &RollupPolicy,
) -> EngineResult<FinancialRollup> {
    let payroll = aggregate(&ledger.work_entries, period)?;
    let revenue = total_revenue(&ledger.sales, period)?;
    let bonuses = total_bonuses(&ledger.bonuses, period)?;

    let expenses = apply_expense_policy(
        payroll.total_earned,
        bonuses,
        payroll.total_advanced,
        policy,
    )?;
    let profit = revenue
        .checked_sub(expenses)
        .ok_or_else(|| EngineError::CalculationError {
            message: "decimal overflow computing profit".to_string(),
        })?;

    Ok(FinancialRollup {
        revenue,
        expenses,
        profit,
        total_earned: payroll.total_earned,
        total_bonuses: bonuses,
        total_advanced: payroll.total_advanced,
        total_kg: payroll.total_kg,
    })
}

/// Rolls up a period and compares it with the period before it.
///
/// The preceding period is chosen by [`ReportingPeriod::preceding`].
pub fn rollup_with_comparison(
    ledger: &Ledger,
    period: &ReportingPeriod,
    policy: &RollupPolicy,
    precision: u32,
) -> EngineResult<RollupReport> {
    let previous_period = period.preceding()?;
    let current = rollup(ledger, period, policy)?;
    let previous = rollup(ledger, &previous_period, policy)?;
    let changes = compare_rollups(&current, &previous, precision);

    Ok(RollupReport {
        period: *period,
        previous_period,
        current,
        previous,
        changes,
    })
}

/// Rolls up each calendar month of a year, January first.
pub fn monthly_rollups(
    ledger: &Ledger,
    year: i32,
    policy: &RollupPolicy,
) -> EngineResult<Vec<MonthlyRollup>> {
    (1..=12)
        .map(|month| -> EngineResult<MonthlyRollup> {
            let period = ReportingPeriod::month(year, month)?;
            Ok(MonthlyRollup {
                month: period.start_date,
                rollup: rollup(ledger, &period, policy)?,
            })
        })
        .collect()
}
