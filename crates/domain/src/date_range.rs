// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inclusive leave date ranges.

use crate::error::DomainError;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// ISO-8601 calendar date format (`YYYY-MM-DD`).
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// An inclusive `[start_date, end_date]` range.
///
/// Construction guarantees `end_date >= start_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeaveDates {
    start_date: Date,
    end_date: Date,
}

impl LeaveDates {
    /// Creates a new inclusive date range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `end_date` precedes `start_date`.
    pub fn new(start_date: Date, end_date: Date) -> Result<Self, DomainError> {
        if end_date < start_date {
            return Err(DomainError::InvalidDateRange {
                start_date,
                end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Parses both endpoints from `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns an error if either date fails to parse or the range is inverted.
    pub fn parse(start_date: &str, end_date: &str) -> Result<Self, DomainError> {
        Self::new(parse_date(start_date)?, parse_date(end_date)?)
    }

    /// Returns the first day of leave.
    #[must_use]
    pub const fn start_date(&self) -> Date {
        self.start_date
    }

    /// Returns the last day of leave.
    #[must_use]
    pub const fn end_date(&self) -> Date {
        self.end_date
    }

    /// Number of days covered, counting both endpoints.
    #[must_use]
    pub const fn day_count(&self) -> i32 {
        self.end_date.to_julian_day() - self.start_date.to_julian_day() + 1
    }

    /// Returns whether two inclusive ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(other.end_date < self.start_date || other.start_date > self.end_date)
    }

    /// Iterates every calendar date in the range, in order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + use<> {
        let end_date: Date = self.end_date;
        std::iter::successors(Some(self.start_date), move |date| {
            date.next_day().filter(|next| *next <= end_date)
        })
    }
}

impl std::fmt::Display for LeaveDates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            format_date(self.start_date),
            format_date(self.end_date)
        )
    }
}

/// Parses a `YYYY-MM-DD` date string.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    let month: u8 = date.month().into();
    format!("{:04}-{month:02}-{:02}", date.year(), date.day())
}
