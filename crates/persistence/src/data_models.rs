// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and their conversion into domain snapshots.
//!
//! Dates are stored as `YYYY-MM-DD` text and timestamps as RFC 3339 text.

use diesel::prelude::*;
use leaves_domain::{
    Allocation, Employee, LeaveDates, LeaveRequest, LeaveStatus, LeaveType, Role, parse_date,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::diesel_schema::{employees, leave_allocations, leave_requests, leave_types};
use crate::error::PersistenceError;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = employees)]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub join_date: String,
    pub role: String,
}

impl EmployeeRow {
    pub fn into_domain(self) -> Result<Employee, PersistenceError> {
        Ok(Employee {
            employee_id: self.employee_id,
            name: self.name,
            email: self.email,
            department: self.department,
            join_date: parse_date(&self.join_date).map_err(reconstruction)?,
            role: self.role.parse::<Role>().map_err(reconstruction)?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = leave_types)]
pub struct LeaveTypeRow {
    pub leave_type_id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<LeaveTypeRow> for LeaveType {
    fn from(row: LeaveTypeRow) -> Self {
        Self {
            leave_type_id: row.leave_type_id,
            name: row.name,
            description: row.description,
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = leave_allocations)]
pub struct AllocationRow {
    pub allocation_id: i64,
    pub employee_id: i64,
    pub leave_type_id: i64,
    pub year: i32,
    pub total_allocated: i32,
    pub remaining: i32,
}

impl AllocationRow {
    pub fn into_domain(self) -> Result<Allocation, PersistenceError> {
        let allocation: Allocation = Allocation {
            allocation_id: self.allocation_id,
            employee_id: self.employee_id,
            leave_type_id: self.leave_type_id,
            year: self.year,
            total_allocated: self.total_allocated,
            remaining: self.remaining,
        };
        allocation.validate().map_err(reconstruction)?;
        Ok(allocation)
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = leave_requests)]
pub struct LeaveRequestRow {
    pub request_id: i64,
    pub employee_id: i64,
    pub leave_type_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub days: i32,
    pub reason: String,
    pub status: String,
    pub admin_comment: Option<String>,
    pub approved_by: Option<i64>,
    pub approved_at: Option<String>,
    pub created_at: String,
}

impl LeaveRequestRow {
    pub fn into_domain(self) -> Result<LeaveRequest, PersistenceError> {
        let dates: LeaveDates =
            LeaveDates::parse(&self.start_date, &self.end_date).map_err(reconstruction)?;
        let approved_at: Option<OffsetDateTime> = self
            .approved_at
            .as_deref()
            .map(parse_timestamp)
            .transpose()?;

        Ok(LeaveRequest {
            request_id: self.request_id,
            employee_id: self.employee_id,
            leave_type_id: self.leave_type_id,
            dates,
            days: self.days,
            reason: self.reason,
            status: self.status.parse::<LeaveStatus>().map_err(reconstruction)?,
            admin_comment: self.admin_comment,
            approved_by: self.approved_by,
            approved_at,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

/// An employee with the approved days counted for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeLeaveSummary {
    pub employee: Employee,
    pub approved_days: i64,
}

/// Narrows a request listing. `None` fields do not filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestFilter {
    pub status: Option<LeaveStatus>,
    pub employee_id: Option<i64>,
}

/// Request counts per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

impl StatusCounts {
    /// Sum over all statuses.
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.pending + self.approved + self.rejected
    }
}

/// Statistics shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDashboard {
    pub counts: StatusCounts,
    pub total_employees: i64,
    /// Pending requests submitted on the evaluation date.
    pub pending_today: i64,
    /// Newest pending requests first.
    pub recent_pending: Vec<LeaveRequest>,
}

/// Statistics shown on an employee's dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDashboard {
    pub counts: StatusCounts,
    /// Approved days whose start date falls in the requested year.
    pub approved_days: i64,
    /// Newest own requests first.
    pub recent_requests: Vec<LeaveRequest>,
}

/// Formats a timestamp as RFC 3339 text.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented.
pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, PersistenceError> {
    timestamp
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| PersistenceError::ReconstructionError(format!("'{value}': {e}")))
}

fn reconstruction<E: std::fmt::Display>(err: E) -> PersistenceError {
    PersistenceError::ReconstructionError(err.to_string())
}
