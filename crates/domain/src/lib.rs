// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod balance;
mod date_range;
mod error;
mod period;
mod policy;
mod quota;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use balance::{LeaveBalance, calculate_leave_balance, pending_days};
pub use date_range::{LeaveDates, format_date, parse_date};
pub use error::DomainError;
pub use period::LeavePeriod;
pub use policy::AllocationYearPolicy;
pub use quota::{CASUAL_LEAVE, LeaveQuota, SICK_LEAVE, STANDARD_QUOTAS};
pub use types::{
    Allocation, AllocationKey, Employee, LeaveRequest, LeaveStatus, LeaveType, Role,
};
pub use validation::{
    MAX_COMMENT_LENGTH, MAX_NAME_LENGTH, MAX_REASON_LENGTH, MIN_REASON_LENGTH,
    validate_admin_comment, validate_department, validate_email, validate_employee_name,
    validate_join_date_change, validate_reason, validate_rejection_comment, validate_start_date,
    validate_year,
};
