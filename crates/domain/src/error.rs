// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
///
/// These represent malformed input: they are detected before any
/// balance or lifecycle rule is consulted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The end date precedes the start date.
    #[error("End date {end_date} must be on or after start date {start_date}")]
    InvalidDateRange {
        /// The requested start date.
        start_date: Date,
        /// The requested end date.
        end_date: Date,
    },
    /// The start date lies before today.
    #[error("Start date {start_date} must be today ({today}) or later")]
    StartDateInPast {
        /// The requested start date.
        start_date: Date,
        /// The date the request was evaluated on.
        today: Date,
    },
    /// The leave reason is empty, too short, or too long.
    #[error("Invalid reason: {0}")]
    InvalidReason(String),
    /// The admin comment is too long.
    #[error("Invalid admin comment: {0}")]
    InvalidAdminComment(String),
    /// A rejection was attempted without a comment.
    #[error("Please provide a reason for rejection")]
    MissingRejectionComment,
    /// Invalid allocation year.
    #[error("Invalid year: {0}")]
    InvalidYear(String),
    /// Employee name is empty or invalid.
    #[error("Invalid name: {0}")]
    InvalidName(String),
    /// Employee email is empty or invalid.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),
    /// Department is invalid.
    #[error("Invalid department: {0}")]
    InvalidDepartment(String),
    /// Unknown leave status string.
    #[error("Invalid leave status: {0}")]
    InvalidLeaveStatus(String),
    /// Unknown role string.
    #[error("Invalid role: {0}")]
    InvalidRole(String),
    /// Employee directory filter or period is malformed.
    #[error("Invalid period: {0}")]
    InvalidLeavePeriod(String),
    /// A changed join date lies before today.
    #[error("Join date {join_date} cannot be in the past (today is {today})")]
    JoinDateInPast {
        /// The requested join date.
        join_date: Date,
        /// The date the change was evaluated on.
        today: Date,
    },
    /// Unknown allocation-year policy string.
    #[error("Invalid allocation year policy: {0}")]
    InvalidAllocationYearPolicy(String),
    /// Allocation counters violate `0 <= remaining <= total_allocated`.
    #[error("Invalid allocation: remaining {remaining} must be between 0 and {total_allocated}")]
    InvalidAllocation {
        /// The total days allocated.
        total_allocated: i32,
        /// The remaining days.
        remaining: i32,
    },
    /// Failed to parse date from string.
    #[error("Failed to parse date '{date_string}': {error}")]
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}
