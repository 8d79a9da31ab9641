// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::date_range::LeaveDates;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// The role an employee holds.
///
/// Roles are resolved by the identity collaborator and passed in
/// explicitly; the engine never looks them up on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A regular employee who submits leave requests.
    #[default]
    Employee,
    /// An administrator who reviews leave requests.
    Admin,
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "employee" => Ok(Self::Employee),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The lifecycle state of a leave request.
///
/// Valid transitions are:
/// - `Pending` → `Approved`
/// - `Pending` → `Rejected`
///
/// Both `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    /// Submitted and awaiting review. Days are not yet debited.
    #[default]
    Pending,
    /// Approved by an admin. Days have been debited from the allocation.
    Approved,
    /// Rejected by an admin. The allocation was never touched.
    Rejected,
}

impl LeaveStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Checks if a transition from this status to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        !self.is_terminal() && target.is_terminal()
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl FromStr for LeaveStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidLeaveStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An employee snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// The canonical numeric identifier assigned by the database.
    pub employee_id: i64,
    /// The employee's display name.
    pub name: String,
    /// The employee's email (normalized to lowercase).
    pub email: String,
    /// Optional department name.
    pub department: Option<String>,
    /// The date the employee joined.
    pub join_date: Date,
    /// The employee's role.
    pub role: Role,
}

impl Employee {
    /// Returns whether this employee holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// A named leave category (e.g. "Sick", "Casual").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeaveType {
    /// The canonical numeric identifier assigned by the database.
    pub leave_type_id: i64,
    /// The leave type name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// The unique key of an allocation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AllocationKey {
    /// The employee the allocation belongs to.
    pub employee_id: i64,
    /// The leave type the allocation grants.
    pub leave_type_id: i64,
    /// The calendar year the allocation covers.
    pub year: i32,
}

impl AllocationKey {
    /// Creates a new `AllocationKey`.
    #[must_use]
    pub const fn new(employee_id: i64, leave_type_id: i64, year: i32) -> Self {
        Self {
            employee_id,
            leave_type_id,
            year,
        }
    }
}

/// A yearly day quota for one employee and one leave type.
///
/// `remaining` only shrinks when a request is approved; pending
/// requests are accounted for separately (see `LeaveBalance`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// The canonical numeric identifier assigned by the database.
    pub allocation_id: i64,
    /// The employee the allocation belongs to.
    pub employee_id: i64,
    /// The leave type the allocation grants.
    pub leave_type_id: i64,
    /// The calendar year the allocation covers.
    pub year: i32,
    /// Days granted for the year.
    pub total_allocated: i32,
    /// Days not yet consumed by approved requests.
    pub remaining: i32,
}

impl Allocation {
    /// Returns the unique key of this allocation.
    #[must_use]
    pub const fn key(&self) -> AllocationKey {
        AllocationKey::new(self.employee_id, self.leave_type_id, self.year)
    }

    /// Days consumed by approved requests.
    #[must_use]
    pub const fn used(&self) -> i32 {
        self.total_allocated - self.remaining
    }

    /// Returns whether `days` can be debited without going negative.
    #[must_use]
    pub const fn can_debit(&self, days: i32) -> bool {
        days >= 0 && self.remaining >= days
    }

    /// Checks the `0 <= remaining <= total_allocated` invariant.
    ///
    /// # Errors
    ///
    /// Returns an error if the counters are out of range.
    pub const fn validate(&self) -> Result<(), DomainError> {
        if self.remaining < 0 || self.remaining > self.total_allocated {
            return Err(DomainError::InvalidAllocation {
                total_allocated: self.total_allocated,
                remaining: self.remaining,
            });
        }
        Ok(())
    }
}

/// A leave request snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveRequest {
    /// The canonical numeric identifier assigned by the database.
    pub request_id: i64,
    /// The employee who owns the request.
    pub employee_id: i64,
    /// The requested leave type.
    pub leave_type_id: i64,
    /// The inclusive date range.
    pub dates: LeaveDates,
    /// Inclusive day count of `dates`.
    pub days: i32,
    /// The employee's stated reason.
    pub reason: String,
    /// The current lifecycle status.
    pub status: LeaveStatus,
    /// Comment left by the reviewing admin.
    pub admin_comment: Option<String>,
    /// The admin who approved the request.
    pub approved_by: Option<i64>,
    /// When the request was approved.
    pub approved_at: Option<OffsetDateTime>,
    /// When the request was submitted.
    pub created_at: OffsetDateTime,
}

impl LeaveRequest {
    /// Returns whether the request is awaiting review.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, LeaveStatus::Pending)
    }
}
