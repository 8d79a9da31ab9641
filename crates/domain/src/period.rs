// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reporting periods for the employee directory.
//!
//! A period selects approved leave by the month or year its start date
//! falls in.

use crate::error::DomainError;
use crate::validation::validate_year;
use time::Month;

/// A calendar month or year that approved leave is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeavePeriod {
    /// One calendar month (`filter=monthly`, `period=YYYY-MM`).
    Monthly {
        /// The calendar year.
        year: i32,
        /// The month within the year.
        month: Month,
    },
    /// One calendar year (`filter=yearly`, `period=YYYY`).
    Yearly {
        /// The calendar year.
        year: i32,
    },
}

impl LeavePeriod {
    /// Builds a period from the `filter` and `period` inputs.
    ///
    /// A missing or blank `filter` or `period` means no period.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLeavePeriod` if the filter is not
    /// `monthly` or `yearly`, or the period does not match it.
    pub fn parse(filter: Option<&str>, period: Option<&str>) -> Result<Option<Self>, DomainError> {
        let filter: &str = filter.map(str::trim).unwrap_or_default();
        let period: &str = period.map(str::trim).unwrap_or_default();
        if filter.is_empty() || period.is_empty() {
            return Ok(None);
        }

        match filter.to_lowercase().as_str() {
            "monthly" => {
                let Some((year, month)) = period.split_once('-') else {
                    return Err(DomainError::InvalidLeavePeriod(format!(
                        "Monthly period '{period}' must look like YYYY-MM"
                    )));
                };
                let year: i32 = parse_year(year, period)?;
                let month: Month = month
                    .parse::<u8>()
                    .ok()
                    .and_then(|number| Month::try_from(number).ok())
                    .ok_or_else(|| {
                        DomainError::InvalidLeavePeriod(format!(
                            "'{period}' does not name a month"
                        ))
                    })?;
                Ok(Some(Self::Monthly { year, month }))
            }
            "yearly" => Ok(Some(Self::Yearly {
                year: parse_year(period, period)?,
            })),
            other => Err(DomainError::InvalidLeavePeriod(format!(
                "Unknown filter '{other}', expected 'monthly' or 'yearly'"
            ))),
        }
    }

    /// The `YYYY-MM-` or `YYYY-` prefix shared by every `YYYY-MM-DD` date
    /// in the period.
    #[must_use]
    pub fn date_prefix(&self) -> String {
        match self {
            Self::Monthly { year, month } => format!("{year:04}-{:02}-", u8::from(*month)),
            Self::Yearly { year } => format!("{year:04}-"),
        }
    }
}

fn parse_year(value: &str, period: &str) -> Result<i32, DomainError> {
    let year: i32 = value.parse().map_err(|_| {
        DomainError::InvalidLeavePeriod(format!("'{period}' does not start with a year"))
    })?;
    validate_year(year).map_err(|err| DomainError::InvalidLeavePeriod(err.to_string()))?;
    Ok(year)
}
