// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leaves_domain::{AllocationYearPolicy, LeaveDates};
use time::Date;

/// Runtime configuration of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerConfig {
    /// Selects which year's allocation a request is validated and debited against.
    pub allocation_year_policy: AllocationYearPolicy,
}

impl LedgerConfig {
    /// Creates a configuration with the given policy.
    #[must_use]
    pub const fn new(allocation_year_policy: AllocationYearPolicy) -> Self {
        Self {
            allocation_year_policy,
        }
    }

    /// Resolves the allocation year for a request evaluated on `today`.
    #[must_use]
    pub const fn allocation_year(&self, today: Date, dates: &LeaveDates) -> i32 {
        self.allocation_year_policy.allocation_year(today, dates)
    }
}
