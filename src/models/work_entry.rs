//! Work entry model and related types.
//!
//! This module defines the [`WorkEntry`] row as it is stored by the estate's
//! data layer, and the [`PricedEntry`] produced once the wage calculator has
//! classified and priced it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of a daily work entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Harvested tea paid by weight, plus any extra work.
    Plucking,
    /// Cash prepayment to be deducted from future payroll.
    Advance,
}

impl EntryKind {
    /// Returns the snake_case name used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Plucking => "plucking",
            EntryKind::Advance => "advance",
        }
    }
}

/// A flat payment for auxiliary labour bundled into a plucking entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraWorkItem {
    /// What the work was (e.g., "weeding", "pruning").
    pub description: String,
    /// The flat amount paid for it.
    pub amount: Decimal,
}

impl ExtraWorkItem {
    /// Creates a new extra work item.
    pub fn new(description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            description: description.into(),
            amount,
        }
    }
}

/// One row of daily labour activity for a worker.
///
/// The row mirrors the stored record field for field. Its kind is never
/// stored directly: it is derived from the explicit `is_advance` flag by
/// [`classify`](crate::calculation::classify).
///
/// # Example
///
/// ```
/// use tea_payroll_engine::models::{ExtraWorkItem, WorkEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
/// let entry = WorkEntry::plucking("worker_b", date, Decimal::from(20), Decimal::from(150))
///     .with_extra_work(ExtraWorkItem::new("weeding", Decimal::from(500)));
///
/// assert_eq!(entry.is_advance, Some(false));
/// assert_eq!(entry.extra_work_total(), Decimal::from(500));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkEntry {
    /// Identifier of the worker (owned by the external store).
    pub worker_id: String,
    /// The business date the entry applies to.
    pub date: NaiveDate,
    /// Explicit advance flag. `None` on legacy rows that never recorded it.
    #[serde(default)]
    pub is_advance: Option<bool>,
    /// Harvested weight in kilograms (plucking only).
    #[serde(default)]
    pub quantity_kg: Decimal,
    /// Price paid per kilogram (plucking only).
    #[serde(default)]
    pub rate_per_kg: Decimal,
    /// Flat extra-work payments in the order they were entered.
    #[serde(default)]
    pub extra_work_items: Vec<ExtraWorkItem>,
    /// Cash advanced to the worker (advance only).
    #[serde(default)]
    pub advance_amount: Decimal,
    /// Free text, no effect on any calculation.
    #[serde(default)]
    pub notes: Option<String>,
}

impl WorkEntry {
    /// Creates a plucking entry with no extra work.
    pub fn plucking(
        worker_id: impl Into<String>,
        date: NaiveDate,
        quantity_kg: Decimal,
        rate_per_kg: Decimal,
    ) -> Self {
        Self {
            worker_id: worker_id.into(),
            date,
            is_advance: Some(false),
            quantity_kg,
            rate_per_kg,
            extra_work_items: Vec::new(),
            advance_amount: Decimal::ZERO,
            notes: None,
        }
    }

    /// Creates an advance entry.
    pub fn advance(worker_id: impl Into<String>, date: NaiveDate, amount: Decimal) -> Self {
        Self {
            worker_id: worker_id.into(),
            date,
            is_advance: Some(true),
            quantity_kg: Decimal::ZERO,
            rate_per_kg: Decimal::ZERO,
            extra_work_items: Vec::new(),
            advance_amount: amount,
            notes: None,
        }
    }

    /// Appends an extra work item.
    pub fn with_extra_work(mut self, item: ExtraWorkItem) -> Self {
        self.extra_work_items.push(item);
        self
    }

    /// Sum of all extra work amounts on the entry.
    pub fn extra_work_total(&self) -> Decimal {
        self.extra_work_items.iter().map(|item| item.amount).sum()
    }

    /// Switches the entry to the given kind, as the edit form does when the
    /// advance toggle changes.
    ///
    /// Fields that only apply to the other kind are cleared so that stale
    /// values from a prior edit can never leak into the computed amount.
    ///
    /// # Example
    ///
    /// ```
    /// use tea_payroll_engine::models::{EntryKind, WorkEntry};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
    /// let mut entry = WorkEntry::plucking("worker_a", date, Decimal::from(12), Decimal::from(150));
    /// entry.switch_kind(EntryKind::Advance);
    ///
    /// assert_eq!(entry.is_advance, Some(true));
    /// assert_eq!(entry.quantity_kg, Decimal::ZERO);
    /// assert_eq!(entry.rate_per_kg, Decimal::ZERO);
    /// ```
    pub fn switch_kind(&mut self, kind: EntryKind) {
        match kind {
            EntryKind::Plucking => {
                self.is_advance = Some(false);
                self.advance_amount = Decimal::ZERO;
            }
            EntryKind::Advance => {
                self.is_advance = Some(true);
                self.quantity_kg = Decimal::ZERO;
                self.rate_per_kg = Decimal::ZERO;
                self.extra_work_items.clear();
            }
        }
    }
}

/// The priced content of a work entry, tagged by kind.
///
/// Only the fields meaningful for the kind are carried, so a priced advance
/// can never hold a stray quantity and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkLine {
    /// A plucking record.
    Plucking {
        /// Harvested weight in kilograms.
        quantity_kg: Decimal,
        /// Price paid per kilogram.
        rate_per_kg: Decimal,
        /// Extra work bundled into the entry.
        extra_work_items: Vec<ExtraWorkItem>,
    },
    /// An advance payment.
    Advance {
        /// The cash advanced.
        amount: Decimal,
    },
}

impl WorkLine {
    /// Returns the kind of this line.
    pub fn kind(&self) -> EntryKind {
        match self {
            WorkLine::Plucking { .. } => EntryKind::Plucking,
            WorkLine::Advance { .. } => EntryKind::Advance,
        }
    }
}

/// A work entry after classification and pricing.
///
/// `computed_amount` is positive for plucking and negative for advances; its
/// sign always agrees with `line`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedEntry {
    /// Identifier of the worker.
    pub worker_id: String,
    /// The business date.
    pub date: NaiveDate,
    /// The classified content of the entry.
    pub line: WorkLine,
    /// The signed monetary contribution of the entry to payroll.
    pub computed_amount: Decimal,
}

impl PricedEntry {
    /// Returns the kind of the entry.
    pub fn kind(&self) -> EntryKind {
        self.line.kind()
    }

    /// Harvested weight, zero for advances.
    pub fn quantity_kg(&self) -> Decimal {
        match &self.line {
            WorkLine::Plucking { quantity_kg, .. } => *quantity_kg,
            WorkLine::Advance { .. } => Decimal::ZERO,
        }
    }

    /// Cash that left the till for this entry, regardless of kind.
    pub fn amount_paid(&self) -> Decimal {
        self.computed_amount.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
    }

    #[test]
    fn test_plucking_constructor_sets_explicit_flag() {
        let entry = WorkEntry::plucking("worker_a", test_date(), dec("15.5"), dec("150"));
        assert_eq!(entry.is_advance, Some(false));
        assert_eq!(entry.advance_amount, Decimal::ZERO);
        assert!(entry.extra_work_items.is_empty());
    }

    #[test]
    fn test_advance_constructor_zeroes_plucking_fields() {
        let entry = WorkEntry::advance("worker_a", test_date(), dec("2000"));
        assert_eq!(entry.is_advance, Some(true));
        assert_eq!(entry.quantity_kg, Decimal::ZERO);
        assert_eq!(entry.rate_per_kg, Decimal::ZERO);
        assert_eq!(entry.advance_amount, dec("2000"));
    }

    #[test]
    fn test_extra_work_total_sums_items() {
        let entry = WorkEntry::plucking("worker_b", test_date(), dec("20"), dec("150"))
            .with_extra_work(ExtraWorkItem::new("weeding", dec("500")))
            .with_extra_work(ExtraWorkItem::new("pruning", dec("250.50")));
        assert_eq!(entry.extra_work_total(), dec("750.50"));
    }

    #[test]
    fn test_switch_to_advance_clears_plucking_fields() {
        let mut entry = WorkEntry::plucking("worker_b", test_date(), dec("20"), dec("150"))
            .with_extra_work(ExtraWorkItem::new("weeding", dec("500")));
        entry.switch_kind(EntryKind::Advance);

        assert_eq!(entry.is_advance, Some(true));
        assert_eq!(entry.quantity_kg, Decimal::ZERO);
        assert_eq!(entry.rate_per_kg, Decimal::ZERO);
        assert!(entry.extra_work_items.is_empty());
    }

    #[test]
    fn test_switch_to_plucking_clears_advance_amount() {
        let mut entry = WorkEntry::advance("worker_a", test_date(), dec("2000"));
        entry.switch_kind(EntryKind::Plucking);

        assert_eq!(entry.is_advance, Some(false));
        assert_eq!(entry.advance_amount, Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_legacy_row_without_flag() {
        let json = r#"{
            "worker_id": "worker_c",
            "date": "2025-03-04",
            "quantity_kg": "0",
            "rate_per_kg": "150"
        }"#;

        let entry: WorkEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.is_advance, None);
        assert_eq!(entry.advance_amount, Decimal::ZERO);
        assert!(entry.notes.is_none());
    }

    #[test]
    fn test_work_line_serializes_with_kind_tag() {
        let line = WorkLine::Advance {
            amount: dec("2000"),
        };
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"kind\":\"advance\""));
        assert!(json.contains("\"amount\":\"2000\""));
    }

    #[test]
    fn test_priced_advance_has_no_quantity() {
        let priced = PricedEntry {
            worker_id: "worker_a".to_string(),
            date: test_date(),
            line: WorkLine::Advance {
                amount: dec("2000"),
            },
            computed_amount: dec("-2000"),
        };
        assert_eq!(priced.kind(), EntryKind::Advance);
        assert_eq!(priced.quantity_kg(), Decimal::ZERO);
        assert_eq!(priced.amount_paid(), dec("2000"));
    }

    #[test]
    fn test_entry_kind_as_str() {
        assert_eq!(EntryKind::Plucking.as_str(), "plucking");
        assert_eq!(EntryKind::Advance.as_str(), "advance");
    }
}
