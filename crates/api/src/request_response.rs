// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates cross the boundary as `YYYY-MM-DD` strings and timestamps as
//! RFC 3339 strings.

use leaves_domain::{Employee, LeaveBalance, LeaveRequest, Role, format_date};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// API request to register a new employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterEmployeeRequest {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Optional department.
    #[serde(default)]
    pub department: Option<String>,
    /// Join date; defaults to today.
    #[serde(default)]
    pub join_date: Option<String>,
}

/// API response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterEmployeeResponse {
    /// The canonical numeric identifier.
    pub employee_id: i64,
    /// The stored name.
    pub name: String,
    /// The stored (lowercased) email.
    pub email: String,
    /// The stored department.
    pub department: Option<String>,
    /// The join date.
    pub join_date: String,
    /// Always `employee`.
    pub role: Role,
    /// The year the standard quotas were granted for.
    pub allocation_year: i32,
    /// A success message.
    pub message: String,
}

/// An employee as shown to admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInfo {
    pub employee_id: i64,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    /// `YYYY-MM-DD`.
    pub join_date: String,
    pub role: Role,
}

impl From<&Employee> for EmployeeInfo {
    fn from(employee: &Employee) -> Self {
        Self {
            employee_id: employee.employee_id,
            name: employee.name.clone(),
            email: employee.email.clone(),
            department: employee.department.clone(),
            join_date: format_date(employee.join_date),
            role: employee.role,
        }
    }
}

/// Query parameters for the employee directory.
///
/// `filter` is `monthly` (with `period=YYYY-MM`) or `yearly` (with
/// `period=YYYY`). Leaving either out lists everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEmployeesQuery {
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
}

/// One row of the employee directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeListEntry {
    #[serde(flatten)]
    pub employee: EmployeeInfo,
    /// Approved days starting in the requested period, or in total when
    /// no period was given.
    pub approved_days: i64,
}

/// API response for the employee directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEmployeesResponse {
    pub employees: Vec<EmployeeListEntry>,
}

/// API request to edit an employee.
///
/// `department` replaces the stored value (absent clears it). An absent
/// `join_date` keeps the stored one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub join_date: Option<String>,
}

/// API response for an edited employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEmployeeResponse {
    pub employee: EmployeeInfo,
    pub message: String,
}

/// API response for a deleted employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEmployeeResponse {
    pub employee_id: i64,
    pub message: String,
}

/// An employee's balances for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSummaryResponse {
    /// The employee.
    pub employee_id: i64,
    /// The year summarized.
    pub year: i32,
    /// One entry per allocated leave type.
    pub balances: Vec<LeaveBalance>,
}

/// API request to submit a leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitLeaveRequest {
    /// The requested leave type.
    pub leave_type_id: i64,
    /// First day of leave (`YYYY-MM-DD`).
    pub start_date: String,
    /// Last day of leave, inclusive (`YYYY-MM-DD`).
    pub end_date: String,
    /// Free-text reason.
    pub reason: String,
}

/// API request body for approving or rejecting a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewLeaveRequest {
    /// Optional on approval, required on rejection.
    #[serde(default)]
    pub admin_comment: Option<String>,
}

/// A leave request as presented to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequestInfo {
    /// The canonical numeric identifier.
    pub request_id: i64,
    /// The owning employee.
    pub employee_id: i64,
    /// The leave type.
    pub leave_type_id: i64,
    /// First day of leave.
    pub start_date: String,
    /// Last day of leave, inclusive.
    pub end_date: String,
    /// Inclusive day count.
    pub days: i32,
    /// Free-text reason.
    pub reason: String,
    /// `pending`, `approved` or `rejected`.
    pub status: String,
    /// Reviewer comment.
    pub admin_comment: Option<String>,
    /// The approving admin.
    pub approved_by: Option<i64>,
    /// When the request was approved.
    pub approved_at: Option<String>,
    /// When the request was submitted.
    pub created_at: String,
}

fn format_timestamp(timestamp: OffsetDateTime) -> String {
    timestamp
        .format(&Rfc3339)
        .unwrap_or_else(|_| timestamp.to_string())
}

impl From<&LeaveRequest> for LeaveRequestInfo {
    fn from(request: &LeaveRequest) -> Self {
        Self {
            request_id: request.request_id,
            employee_id: request.employee_id,
            leave_type_id: request.leave_type_id,
            start_date: format_date(request.dates.start_date()),
            end_date: format_date(request.dates.end_date()),
            days: request.days,
            reason: request.reason.clone(),
            status: request.status.as_str().to_string(),
            admin_comment: request.admin_comment.clone(),
            approved_by: request.approved_by,
            approved_at: request.approved_at.map(format_timestamp),
            created_at: format_timestamp(request.created_at),
        }
    }
}

/// API response for a submission or review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequestResponse {
    /// The request after the operation.
    pub request: LeaveRequestInfo,
    /// A success message.
    pub message: String,
}

/// API response for a withdrawn request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteLeaveRequestResponse {
    /// The withdrawn request.
    pub request_id: i64,
    /// A success message.
    pub message: String,
}

/// Filters for listing leave requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLeaveRequestsQuery {
    /// Only requests with this status.
    #[serde(default)]
    pub status: Option<String>,
    /// Only requests of this employee (admins only).
    #[serde(default)]
    pub employee_id: Option<i64>,
}

/// API response listing leave requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLeaveRequestsResponse {
    /// Matching requests, newest first.
    pub requests: Vec<LeaveRequestInfo>,
}

/// Every date covered by the caller's pending requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabledDatesResponse {
    /// Sorted, de-duplicated `YYYY-MM-DD` dates.
    pub dates: Vec<String>,
}

/// Request counts by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCountsInfo {
    /// Pending requests.
    pub pending: i64,
    /// Approved requests.
    pub approved: i64,
    /// Rejected requests.
    pub rejected: i64,
    /// All live requests.
    pub total: i64,
}

/// Statistics shown to admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminDashboardInfo {
    /// Counts across every employee.
    pub counts: StatusCountsInfo,
    /// Registered employees (any role).
    pub total_employees: i64,
    /// Pending requests submitted today.
    pub pending_today: i64,
    /// The most recent pending requests.
    pub recent_pending: Vec<LeaveRequestInfo>,
}

/// Statistics shown to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDashboardInfo {
    /// The year used for `approved_days`.
    pub year: i32,
    /// Counts of the employee's own requests.
    pub counts: StatusCountsInfo,
    /// Approved days whose start date falls in `year`.
    pub approved_days: i64,
    /// The employee's most recent requests.
    pub recent_requests: Vec<LeaveRequestInfo>,
}

/// Dashboard statistics for the caller's role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DashboardResponse {
    /// The admin view.
    Admin(AdminDashboardInfo),
    /// The employee view.
    Employee(EmployeeDashboardInfo),
}

/// API request to run the yearly allocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunAllocationRequest {
    /// The year to allocate; defaults to the current year.
    #[serde(default)]
    pub year: Option<i32>,
}

/// API response for a yearly allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunAllocationResponse {
    /// The allocated year.
    pub year: i32,
    /// Allocation rows created.
    pub created: usize,
    /// Allocation rows reset.
    pub updated: usize,
    /// Employees that received allocations.
    pub employees_processed: usize,
    /// A success message.
    pub message: String,
}
