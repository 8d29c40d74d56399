//! Reporting month
//!
//! Stored as the first day of the month. Accepted inputs:
//! - `2026-10` (what `<input type="month">` posts)
//! - `2026-10-18` (a full date; the day is dropped)
//! - `October 2026` (the display form)

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::FormError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportMonth(NaiveDate);

impl ReportMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// Month containing today's local date.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn parse(input: &str) -> Result<Self, FormError> {
        let trimmed = input.trim();

        let parsed = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d"))
            .or_else(|_| NaiveDate::parse_from_str(&format!("1 {trimmed}"), "%d %B %Y"));

        parsed
            .map(Self::from_date)
            .map_err(|_| FormError::InvalidMonth(input.to_string()))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// `Month YYYY`, as printed in the report.
    pub fn label(&self) -> String {
        self.0.format("%B %Y").to_string()
    }

    /// `YYYY-MM`, the value format of a month input.
    pub fn iso(&self) -> String {
        self.0.format("%Y-%m").to_string()
    }
}

impl Default for ReportMonth {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl TryFrom<String> for ReportMonth {
    type Error = FormError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ReportMonth> for String {
    fn from(month: ReportMonth) -> Self {
        month.iso()
    }
}
