// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::date_range::LeaveDates;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Selects which year's allocation a request is validated and debited against.
///
/// `CurrentYear` always uses the calendar year of the evaluation date,
/// even for requests whose dates fall in another year. `RequestStartYear`
/// uses the year of the request's start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationYearPolicy {
    /// Use the year of "today".
    #[default]
    CurrentYear,
    /// Use the year of the request's start date.
    RequestStartYear,
}

impl AllocationYearPolicy {
    /// Converts this policy to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentYear => "current-year",
            Self::RequestStartYear => "request-start-year",
        }
    }

    /// Resolves the allocation year for a request.
    ///
    /// # Arguments
    ///
    /// * `today` - The evaluation date
    /// * `dates` - The request's date range
    #[must_use]
    pub const fn allocation_year(&self, today: Date, dates: &LeaveDates) -> i32 {
        match self {
            Self::CurrentYear => today.year(),
            Self::RequestStartYear => dates.start_date().year(),
        }
    }
}

impl FromStr for AllocationYearPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "current-year" => Ok(Self::CurrentYear),
            "request-start-year" => Ok(Self::RequestStartYear),
            _ => Err(DomainError::InvalidAllocationYearPolicy(s.to_string())),
        }
    }
}

impl std::fmt::Display for AllocationYearPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
