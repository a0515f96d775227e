//! # Calendar Dates
//!
//! Range-validated calendar dates as produced by the document scanner and
//! consumed by the age-proof circuit.
//!
//! ## Design Decision
//!
//! Validation is range-only: month 1–12, day 1–31, year 1900..=current UTC
//! year. The upstream OCR heuristic cannot distinguish February 31 from a
//! real date, and the age computation does not need it to. Callers that
//! require full calendar validity must check separately.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A parsed calendar date with range-validated components.
///
/// Produced by the OCR date extractor and consumed by the age-proof
/// circuit. Ordering is chronological (year, then month, then day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateInfo {
    /// Four-digit year, 1900..=current UTC year.
    pub year: i32,
    /// Month 1–12.
    pub month: u32,
    /// Day 1–31 (no per-month validity check).
    pub day: u32,
}

impl DateInfo {
    /// Create a date, validating component ranges.
    ///
    /// The year upper bound is the current UTC year — a birth date cannot
    /// lie in the future.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        let max_year = Utc::now().year();
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(month));
        }
        if !(1..=31).contains(&day) {
            return Err(ValidationError::InvalidDay(day));
        }
        if !(1900..=max_year).contains(&year) {
            return Err(ValidationError::InvalidYear { year, max: max_year });
        }
        Ok(Self { year, month, day })
    }

    /// Today's date in UTC.
    pub fn today() -> Self {
        let now = Utc::now();
        Self {
            year: now.year(),
            month: now.month(),
            day: now.day(),
        }
    }

    /// Whole years elapsed from `self` to `current`, with the standard
    /// has-birthday-occurred adjustment: the difference in years is reduced
    /// by one when the birthday has not yet occurred in the current year.
    pub fn age_at(&self, current: &DateInfo) -> i32 {
        let mut age = current.year - self.year;
        if current.month < self.month || (current.month == self.month && current.day < self.day) {
            age -= 1;
        }
        age
    }

    /// Render as `MM/DD/YYYY`, the dominant format on the ID documents the
    /// scanner handles.
    pub fn to_mdy_string(&self) -> String {
        format!("{:02}/{:02}/{:04}", self.month, self.day, self.year)
    }

    /// Render as ISO `YYYY-MM-DD`.
    pub fn to_iso_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl std::fmt::Display for DateInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}
