//! Reporting period model.
//!
//! This module contains the [`ReportingPeriod`] type used to define the date
//! window of aggregations and financial rollups.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive range of business dates.
///
/// # Example
///
/// ```
/// use tea_payroll_engine::models::ReportingPeriod;
/// use chrono::NaiveDate;
///
/// let march = ReportingPeriod::month(2025, 3).unwrap();
/// assert!(march.contains_date(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
/// assert!(!march.contains_date(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()));
///
/// let before = march.preceding().unwrap();
/// assert_eq!(before.length_days(), march.length_days());
/// assert_eq!(before.end_date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PeriodBounds")]
pub struct ReportingPeriod {
    /// The first date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last date of the period (inclusive).
    pub end_date: NaiveDate,
}

impl ReportingPeriod {
    /// Creates a period, rejecting an end date before the start date.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        if end_date < start_date {
            return Err(EngineError::InvalidPeriod {
                message: format!(
                    "end date {} is before start date {}",
                    end_date, start_date
                ),
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Creates the period covering a whole calendar month.
    pub fn month(year: i32, month: u32) -> EngineResult<Self> {
        let start_date =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| EngineError::InvalidPeriod {
                message: format!("{}-{:02} is not a valid month", year, month),
            })?;
        let end_date = last_day_of_month(start_date)?;
        Self::new(start_date, end_date)
    }

    /// Checks if a given date falls within this period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of days in the period.
    pub fn length_days(&self) -> u64 {
        (self.end_date - self.start_date).num_days().unsigned_abs() + 1
    }

    /// Returns true if the period spans exactly one calendar month.
    pub fn is_calendar_month(&self) -> bool {
        self.start_date.day() == 1
            && last_day_of_month(self.start_date).is_ok_and(|last| last == self.end_date)
    }

    /// Returns the period of equal length immediately before this one.
    ///
    /// The window ends the day before `start_date` and spans the same number
    /// of days, so a 31-day month is compared with the 31 days before it.
    pub fn preceding(&self) -> EngineResult<Self> {
        let out_of_range = || EngineError::InvalidPeriod {
            message: format!(
                "no period precedes {} to {}",
                self.start_date, self.end_date
            ),
        };
        let end_date = self.start_date.pred_opt().ok_or_else(out_of_range)?;
        let start_date = end_date
            .checked_sub_days(Days::new(self.length_days() - 1))
            .ok_or_else(out_of_range)?;
        Self::new(start_date, end_date)
    }
}

/// Unchecked wire form, validated through [`ReportingPeriod::new`].
#[derive(Deserialize)]
struct PeriodBounds {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<PeriodBounds> for ReportingPeriod {
    type Error = EngineError;

    fn try_from(bounds: PeriodBounds) -> EngineResult<Self> {
        Self::new(bounds.start_date, bounds.end_date)
    }
}

fn last_day_of_month(first: NaiveDate) -> EngineResult<NaiveDate> {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| EngineError::InvalidPeriod {
            message: format!("month of {} has no end date", first),
        })
}
