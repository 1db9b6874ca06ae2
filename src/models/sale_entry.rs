//! Tea sale and bonus models.
//!
//! Sales are money received from factories and buyers; bonuses are periodic
//! payments to workers. Neither is derived from work entries.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One row of tea sold to a factory or buyer.
///
/// # Example
///
/// ```
/// use tea_payroll_engine::models::SaleEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let sale = SaleEntry {
///     date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     quantity_kg: Decimal::from(400),
///     rate_per_kg: Decimal::from(250),
///     total_income: None,
///     buyer: Some("Highland Tea Factory".to_string()),
/// };
/// assert_eq!(sale.income().unwrap(), Decimal::from(100_000));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleEntry {
    /// The date of the sale.
    pub date: NaiveDate,
    /// Weight sold in kilograms.
    #[serde(default)]
    pub quantity_kg: Decimal,
    /// Price received per kilogram.
    #[serde(default)]
    pub rate_per_kg: Decimal,
    /// Stored income for the sale. Authoritative when present.
    #[serde(default)]
    pub total_income: Option<Decimal>,
    /// The factory or buyer, for display only.
    #[serde(default)]
    pub buyer: Option<String>,
}

impl SaleEntry {
    /// Returns the income of the sale.
    ///
    /// The stored `total_income` wins when present; otherwise it is derived
    /// as quantity x rate. Negative figures are rejected.
    pub fn income(&self) -> EngineResult<Decimal> {
        if let Some(total) = self.total_income {
            if total < Decimal::ZERO {
                return Err(EngineError::negative("total_income", total));
            }
            return Ok(total);
        }

        if self.quantity_kg < Decimal::ZERO {
            return Err(EngineError::negative("quantity_kg", self.quantity_kg));
        }
        if self.rate_per_kg < Decimal::ZERO {
            return Err(EngineError::negative("rate_per_kg", self.rate_per_kg));
        }

        self.quantity_kg
            .checked_mul(self.rate_per_kg)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!(
                    "decimal overflow deriving sale income {} x {}",
                    self.quantity_kg, self.rate_per_kg
                ),
            })
    }
}

/// One row of a periodic bonus payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusEntry {
    /// First day of the payroll month the bonus belongs to.
    pub month: NaiveDate,
    /// The bonus paid.
    pub amount: Decimal,
    /// The worker receiving the bonus, if recorded per worker.
    #[serde(default)]
    pub worker_id: Option<String>,
    /// Free text, no effect on any calculation.
    #[serde(default)]
    pub notes: Option<String>,
}

impl BonusEntry {
    /// First day of the payroll month, whatever day `month` was stored with.
    pub fn payroll_month(&self) -> NaiveDate {
        self.month.with_day(1).unwrap_or(self.month)
    }

    /// Returns the bonus amount, rejecting negative values.
    pub fn checked_amount(&self) -> EngineResult<Decimal> {
        if self.amount < Decimal::ZERO {
            return Err(EngineError::negative("amount", self.amount));
        }
        Ok(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_sale(quantity: &str, rate: &str, total: Option<&str>) -> SaleEntry {
        SaleEntry {
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            quantity_kg: dec(quantity),
            rate_per_kg: dec(rate),
            total_income: total.map(dec),
            buyer: None,
        }
    }

    #[test]
    fn test_income_derived_from_quantity_and_rate() {
        let sale = create_sale("120.5", "240", None);
        assert_eq!(sale.income().unwrap(), dec("28920"));
    }

    #[test]
    fn test_stored_total_income_is_authoritative() {
        // Stored value disagrees with quantity x rate; the stored value wins.
        let sale = create_sale("100", "250", Some("24000"));
        assert_eq!(sale.income().unwrap(), dec("24000"));
    }

    #[test]
    fn test_negative_sale_rate_rejected() {
        let sale = create_sale("100", "-250", None);
        match sale.income() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "rate_per_kg"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_total_income_rejected() {
        let sale = create_sale("100", "250", Some("-1"));
        assert!(matches!(
            sale.income(),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_bonus_amount_checked() {
        let bonus = BonusEntry {
            month: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            amount: dec("5000"),
            worker_id: None,
            notes: None,
        };
        assert_eq!(bonus.checked_amount().unwrap(), dec("5000"));

        let negative = BonusEntry {
            amount: dec("-5"),
            ..bonus
        };
        assert!(negative.checked_amount().is_err());
    }

    #[test]
    fn test_payroll_month_normalised_to_first_day() {
        let bonus = BonusEntry {
            month: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            amount: dec("5000"),
            worker_id: None,
            notes: None,
        };
        assert_eq!(
            bonus.payroll_month(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
    }
}
