// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Leaves system.
//!
//! Handlers here take an `AuthenticatedActor`, translate request DTOs into
//! domain values, run the core engine against snapshots loaded inside a
//! store transaction, and translate every failure into an `ApiError`.

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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    allocate_year, approve_leave_request, delete_employee, delete_leave_request,
    get_allocation_summary, get_dashboard, get_disabled_dates, get_leave_request, list_employees,
    list_leave_requests, register_employee, reject_leave_request, run_yearly_allocation,
    seed_reference_data, submit_leave_request, update_employee,
};
pub use leaves_domain::Role;
pub use request_response::{
    AdminDashboardInfo, AllocationSummaryResponse, DashboardResponse, DeleteEmployeeResponse,
    DeleteLeaveRequestResponse, DisabledDatesResponse, EmployeeDashboardInfo, EmployeeInfo,
    EmployeeListEntry, LeaveRequestInfo, LeaveRequestResponse, ListEmployeesQuery,
    ListEmployeesResponse, ListLeaveRequestsQuery, ListLeaveRequestsResponse,
    RegisterEmployeeRequest, RegisterEmployeeResponse, ReviewLeaveRequest, RunAllocationRequest,
    RunAllocationResponse, StatusCountsInfo, SubmitLeaveRequest, UpdateEmployeeRequest,
    UpdateEmployeeResponse,
};
