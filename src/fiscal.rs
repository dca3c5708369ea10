//! Fiscal-year window resolution
//!
//! A company configures its fiscal year as a `(month, day)` start. Given a
//! reference date, the window containing it spans exactly one year minus one
//! day. Resolution is total: a start day that does not exist in some year
//! (Feb 29 in a non-leap year, day 31 in a 30-day month) is clamped to the
//! last valid day of that month instead of failing.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::Company;

/// An inclusive fiscal-year interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FiscalWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Build `(year, month, day)` as a date, clamping an overflowing day to the
/// last valid day of the month.
fn clamped_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| {
        let (next_year, next_month) = if month >= 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first| first.pred_opt())
            .unwrap_or(NaiveDate::MIN)
    })
}

/// Resolve the fiscal-year window containing `reference` for a company.
///
/// The candidate start is the configured `(month, day)` in the reference
/// date's calendar year; if the reference falls before it, the window began
/// in the previous calendar year. The end is the day before the equivalent
/// start one year later, clamped the same way.
pub fn fiscal_window(company: &Company, reference: NaiveDate) -> FiscalWindow {
    let month = company.fy_start_month;
    let day = company.fy_start_day;

    let start_this_year = clamped_date(reference.year(), month, day);
    let start = if reference >= start_this_year {
        start_this_year
    } else {
        clamped_date(reference.year() - 1, month, day)
    };
    let end = clamped_date(start.year() + 1, month, day)
        .pred_opt()
        .unwrap_or(NaiveDate::MIN);

    FiscalWindow { start, end }
}
