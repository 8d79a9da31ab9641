// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leaves_domain::{DomainError, LeaveDates, LeaveStatus};

/// Errors that can occur during lifecycle transitions.
///
/// Every variant is raised before any mutation is applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The input was malformed.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    /// The actor lacks the capability for this action.
    #[error("Unauthorized: '{action}' requires the admin role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
    },
    /// No allocation exists for the employee, leave type and year.
    #[error("You do not have any {leave_type_name} leave allocation for {year}")]
    NoAllocation {
        /// The employee the allocation was looked up for.
        employee_id: i64,
        /// The leave type name.
        leave_type_name: String,
        /// The allocation year that was consulted.
        year: i32,
    },
    /// The request does not fit in the effective balance.
    #[error(
        "You only have {effective_remaining} days available for {leave_type_name} leave \
         (including pending requests). You are requesting {requested_days} days"
    )]
    InsufficientBalance {
        /// The spendable balance at the time of the check.
        effective_remaining: i32,
        /// The days requested.
        requested_days: i32,
        /// The leave type name.
        leave_type_name: String,
    },
    /// The date range intersects another pending request of the same employee.
    #[error(
        "The selected date range conflicts with your existing pending leave request \
         {conflicting_request_id} ({conflicting_dates})"
    )]
    DateConflict {
        /// The pending request that overlaps.
        conflicting_request_id: i64,
        /// Its date range.
        conflicting_dates: LeaveDates,
    },
    /// The request is not in a state that permits the operation.
    #[error("Leave request {request_id} is already {status}")]
    InvalidState {
        /// The request.
        request_id: i64,
        /// Its current status.
        status: LeaveStatus,
    },
    /// No pending request owned by the actor matches.
    #[error("Leave request {request_id} not found or cannot be deleted")]
    NotFoundOrNotDeletable {
        /// The request that was targeted.
        request_id: i64,
    },
    /// The leave request does not exist.
    #[error("Leave request {0} not found")]
    RequestNotFound(i64),
    /// The leave type does not exist.
    #[error("Leave type {0} not found")]
    LeaveTypeNotFound(i64),
    /// A reference leave type needed by the yearly allocation is missing.
    #[error("Leave type '{0}' not found. Please ensure the \"Sick\" and \"Casual\" leave types exist")]
    MissingLeaveType(String),
}
