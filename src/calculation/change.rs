//! Period-over-period percentage changes.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{FinancialRollup, RollupChanges};

/// Default number of decimal places kept on percentage changes.
pub const DEFAULT_CHANGE_PRECISION: u32 = 2;

/// Percentage change from `previous` to `current`.
///
/// The change is measured against the magnitude of `previous`, so moving
/// from a loss towards profit reads as an increase. A zero base yields zero
/// rather than an unrenderable infinity.
///
/// # Examples
///
/// ```
/// use tea_payroll_engine::calculation::{percentage_change, DEFAULT_CHANGE_PRECISION};
/// use rust_decimal::Decimal;
///
/// let change = percentage_change(Decimal::from(5000), Decimal::from(4000), DEFAULT_CHANGE_PRECISION);
/// assert_eq!(change, Decimal::from(25));
///
/// let from_zero = percentage_change(Decimal::from(5000), Decimal::ZERO, DEFAULT_CHANGE_PRECISION);
/// assert_eq!(from_zero, Decimal::ZERO);
/// ```
pub fn percentage_change(current: Decimal, previous: Decimal, precision: u32) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }

    let change = current
        .checked_sub(previous)
        .and_then(|delta| delta.checked_div(previous.abs()))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));

    match change {
        Some(change) => {
            change.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
        }
        None => {
            tracing::warn!(
                current = %current,
                previous = %previous,
                "Percentage change out of decimal range, reporting zero"
            );
            Decimal::ZERO
        }
    }
}

/// Percentage changes of every headline figure between two rollups.
pub fn compare_rollups(
    current: &FinancialRollup,
    previous: &FinancialRollup,
    precision: u32,
) -> RollupChanges {
    RollupChanges {
        revenue_change: percentage_change(current.revenue, previous.revenue, precision),
        expenses_change: percentage_change(current.expenses, previous.expenses, precision),
        profit_change: percentage_change(current.profit, previous.profit, precision),
        earned_change: percentage_change(current.total_earned, previous.total_earned, precision),
        kg_change: percentage_change(current.total_kg, previous.total_kg, precision),
    }
}
