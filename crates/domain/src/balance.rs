// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave balance calculation.
//!
//! This module provides read-only aggregation of an allocation and the
//! employee's pending requests to compute the spendable ("effective")
//! balance. Nothing here is persisted; balances are recomputed on every
//! validation and every summary view.

use crate::types::{Allocation, LeaveRequest};
use serde::{Deserialize, Serialize};

/// The balance of one allocation, with pending requests taken into account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The leave type this balance covers.
    pub leave_type_id: i64,
    /// The leave type name (for display).
    pub leave_type_name: String,
    /// The allocation year.
    pub year: i32,
    /// Days granted for the year.
    pub total_allocated: i32,
    /// Days not yet consumed by approved requests.
    pub remaining: i32,
    /// Days consumed by approved requests (`total_allocated` - `remaining`).
    pub total_used: i32,
    /// Days held by pending requests of the same leave type.
    pub total_pending: i32,
    /// `remaining` - `total_pending`. May be negative.
    pub effective_remaining: i32,
}

impl LeaveBalance {
    /// Returns whether a request for `days` fits in the effective balance.
    #[must_use]
    pub const fn can_cover(&self, days: i32) -> bool {
        self.effective_remaining >= days
    }
}

/// Sums the days of the pending requests held by `employee_id` for `leave_type_id`.
///
/// Requests in any other status, or belonging to another employee or
/// leave type, are ignored.
pub fn pending_days<'a, I>(requests: I, employee_id: i64, leave_type_id: i64) -> i32
where
    I: IntoIterator<Item = &'a LeaveRequest>,
{
    requests
        .into_iter()
        .filter(|request| {
            request.is_pending()
                && request.employee_id == employee_id
                && request.leave_type_id == leave_type_id
        })
        .fold(0_i32, |acc, request| acc.saturating_add(request.days))
}

/// Calculates the balance of an allocation.
///
/// # Arguments
///
/// * `allocation` - The allocation row
/// * `leave_type_name` - The leave type's display name
/// * `requests` - The employee's requests; only matching pending ones count
pub fn calculate_leave_balance<'a, I>(
    allocation: &Allocation,
    leave_type_name: &str,
    requests: I,
) -> LeaveBalance
where
    I: IntoIterator<Item = &'a LeaveRequest>,
{
    let total_pending: i32 = pending_days(
        requests,
        allocation.employee_id,
        allocation.leave_type_id,
    );

    LeaveBalance {
        leave_type_id: allocation.leave_type_id,
        leave_type_name: leave_type_name.to_string(),
        year: allocation.year,
        total_allocated: allocation.total_allocated,
        remaining: allocation.remaining,
        total_used: allocation.used(),
        total_pending,
        effective_remaining: allocation.remaining - total_pending,
    }
}
