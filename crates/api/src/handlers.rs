// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each handler authorizes the caller, validates input, and then loads
//! ledger snapshots, asks the core engine for a decision and persists it
//! inside a single store transaction. A failure at any step leaves the
//! store unchanged.

use std::collections::BTreeSet;
use std::str::FromStr;

use leaves::{
    Actor, BootstrapSummary, CoreError, LedgerConfig, NewLeaveRequest, Review, ReviewDecision,
    SubmissionContext, SubmitLeave, ValidatedSubmission, YearlyAllocationPlan, apply_review,
    apply_submission, apply_withdrawal, plan_employee_allocations, plan_yearly_allocations,
    validate_submission,
};
use leaves_domain::{
    AllocationKey, Employee, LeaveBalance, LeavePeriod, LeaveRequest, LeaveStatus, Role,
    calculate_leave_balance, format_date, parse_date, validate_department, validate_email,
    validate_employee_name, validate_join_date_change, validate_year,
};
use leaves_persistence::{
    AdminDashboard, EmployeeChanges, EmployeeDashboard, EmployeeLeaveSummary, NewEmployee,
    Persistence, RequestFilter, StatusCounts,
};
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AdminDashboardInfo, AllocationSummaryResponse, DashboardResponse, DeleteEmployeeResponse,
    DeleteLeaveRequestResponse, DisabledDatesResponse, EmployeeDashboardInfo, EmployeeInfo,
    EmployeeListEntry, LeaveRequestInfo, LeaveRequestResponse, ListEmployeesQuery,
    ListEmployeesResponse, ListLeaveRequestsQuery, ListLeaveRequestsResponse,
    RegisterEmployeeRequest, RegisterEmployeeResponse, ReviewLeaveRequest, RunAllocationRequest,
    RunAllocationResponse, StatusCountsInfo, SubmitLeaveRequest, UpdateEmployeeRequest,
    UpdateEmployeeResponse,
};

/// Parses a `YYYY-MM-DD` input field.
fn parse_date_field(value: &str, field: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(|err| ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    })
}

fn employee_not_found(employee_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Employee"),
        message: format!("Employee {employee_id} does not exist"),
    }
}

fn email_taken(email: &str) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: String::from("unique_email"),
        message: format!("Email '{email}' is already registered"),
    }
}

/// Inserts the reference leave types if they are missing.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn seed_reference_data(persistence: &mut Persistence) -> Result<usize, ApiError> {
    let inserted: usize = persistence.seed_reference_data()?;
    if inserted > 0 {
        info!(inserted, "Seeded reference leave types");
    }
    Ok(inserted)
}

/// Registers a new employee and grants this year's standard quotas.
///
/// The employee row and its allocations are written in one transaction.
///
/// # Arguments
///
/// * `persistence` - The store
/// * `authenticated_actor` - The caller (must be an admin)
/// * `request` - The registration form
/// * `today` - The current date (default join date and allocation year)
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The name, email, department or join date is invalid
/// - The email is already registered
/// - The reference leave types are missing
pub fn register_employee(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    request: RegisterEmployeeRequest,
    today: Date,
) -> Result<RegisterEmployeeResponse, ApiError> {
    AuthorizationService::authorize_register_employee(authenticated_actor)?;

    let name: String = validate_employee_name(&request.name).map_err(translate_domain_error)?;
    let email: String = validate_email(&request.email).map_err(translate_domain_error)?;
    let department: Option<String> =
        validate_department(request.department.as_deref()).map_err(translate_domain_error)?;
    let join_date: Date = match request.join_date.as_deref() {
        Some(value) if !value.trim().is_empty() => parse_date_field(value.trim(), "join_date")?,
        _ => today,
    };
    let year: i32 = today.year();

    let new_employee: NewEmployee = NewEmployee {
        name,
        email,
        department,
        join_date,
        role: Role::Employee,
    };

    let employee_id: i64 = persistence.transaction(|tx| -> Result<i64, ApiError> {
        if tx.find_employee_by_email(&new_employee.email)?.is_some() {
            return Err(email_taken(&new_employee.email));
        }

        let leave_types = tx.list_leave_types()?;
        let employee_id: i64 = tx.insert_employee(&new_employee)?;
        for grant in plan_employee_allocations(employee_id, year, &leave_types)? {
            tx.upsert_allocation(grant)?;
        }
        Ok(employee_id)
    })?;

    info!(employee_id, year, "Registered employee");

    Ok(RegisterEmployeeResponse {
        employee_id,
        name: new_employee.name.clone(),
        email: new_employee.email,
        department: new_employee.department,
        join_date: format_date(join_date),
        role: Role::Employee,
        allocation_year: year,
        message: format!(
            "Successfully registered '{}' with {year} leave allocations",
            new_employee.name
        ),
    })
}

/// Lists employees with the approved days they took.
///
/// With a `monthly` or `yearly` filter only employees whose approved
/// leave starts in that period are listed, each with the days of that
/// leave. Without one every employee is listed with all approved days.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the filter or period
/// is malformed, or the store fails.
pub fn list_employees(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    query: &ListEmployeesQuery,
) -> Result<ListEmployeesResponse, ApiError> {
    AuthorizationService::authorize_manage_employees(authenticated_actor)?;

    let period: Option<LeavePeriod> =
        LeavePeriod::parse(query.filter.as_deref(), query.period.as_deref())
            .map_err(translate_domain_error)?;
    let summaries: Vec<EmployeeLeaveSummary> =
        persistence.list_employees_with_approved_days(period)?;

    debug!(count = summaries.len(), "Listed employees");

    Ok(ListEmployeesResponse {
        employees: summaries
            .iter()
            .map(|summary| EmployeeListEntry {
                employee: EmployeeInfo::from(&summary.employee),
                approved_days: summary.approved_days,
            })
            .collect(),
    })
}

/// Edits an employee's name, email, department and join date.
///
/// # Arguments
///
/// * `persistence` - The store
/// * `authenticated_actor` - The caller (must be an admin)
/// * `employee_id` - The employee to edit
/// * `request` - The new values
/// * `today` - The current date (a changed join date may not precede it)
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - A field is invalid, or a changed join date is in the past
/// - No employee has this ID
/// - The email belongs to another employee
pub fn update_employee(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    employee_id: i64,
    request: UpdateEmployeeRequest,
    today: Date,
) -> Result<UpdateEmployeeResponse, ApiError> {
    AuthorizationService::authorize_manage_employees(authenticated_actor)?;

    let name: String = validate_employee_name(&request.name).map_err(translate_domain_error)?;
    let email: String = validate_email(&request.email).map_err(translate_domain_error)?;
    let department: Option<String> =
        validate_department(request.department.as_deref()).map_err(translate_domain_error)?;
    let requested_join_date: Option<Date> = match request.join_date.as_deref() {
        Some(value) if !value.trim().is_empty() => {
            Some(parse_date_field(value.trim(), "join_date")?)
        }
        _ => None,
    };

    let updated: Employee = persistence.transaction(|tx| -> Result<Employee, ApiError> {
        let existing: Employee = tx
            .get_employee(employee_id)?
            .filter(|employee| employee.role == Role::Employee)
            .ok_or_else(|| employee_not_found(employee_id))?;

        let email_holder: Option<Employee> = tx.find_employee_by_email(&email)?;
        if email_holder.is_some_and(|holder| holder.employee_id != employee_id) {
            return Err(email_taken(&email));
        }

        let join_date: Date = requested_join_date.unwrap_or(existing.join_date);
        validate_join_date_change(existing.join_date, join_date, today)
            .map_err(translate_domain_error)?;

        let changes: EmployeeChanges = EmployeeChanges {
            name,
            email,
            department,
            join_date,
        };
        if !tx.update_employee(employee_id, &changes)? {
            return Err(employee_not_found(employee_id));
        }
        tx.get_employee(employee_id)?
            .ok_or_else(|| employee_not_found(employee_id))
    })?;

    info!(employee_id, "Updated employee");

    Ok(UpdateEmployeeResponse {
        employee: EmployeeInfo::from(&updated),
        message: format!("Successfully updated '{}'", updated.name),
    })
}

/// Deletes an employee together with their allocations and leave
/// requests. Admin accounts cannot be deleted here.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, no employee-role user
/// has this ID, or the store fails.
pub fn delete_employee(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    employee_id: i64,
) -> Result<DeleteEmployeeResponse, ApiError> {
    AuthorizationService::authorize_manage_employees(authenticated_actor)?;

    persistence.transaction(|tx| -> Result<(), ApiError> {
        if tx.delete_employee(employee_id)? {
            Ok(())
        } else {
            Err(employee_not_found(employee_id))
        }
    })?;

    info!(
        employee_id,
        deleted_by = authenticated_actor.employee_id,
        "Deleted employee"
    );

    Ok(DeleteEmployeeResponse {
        employee_id,
        message: String::from("Employee deleted successfully"),
    })
}

/// Summarizes an employee's allocations for `year`.
///
/// # Arguments
///
/// * `persistence` - The store
/// * `authenticated_actor` - The caller (the employee or an admin)
/// * `employee_id` - The employee to summarize
/// * `year` - The allocation year
///
/// # Errors
///
/// Returns an error if the caller may not view the employee, the year is
/// out of range, the employee does not exist, or the store fails.
pub fn get_allocation_summary(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    employee_id: i64,
    year: i32,
) -> Result<AllocationSummaryResponse, ApiError> {
    AuthorizationService::authorize_view_employee(authenticated_actor, employee_id)?;
    validate_year(year).map_err(translate_domain_error)?;

    let employee: Option<Employee> = persistence.get_employee(employee_id)?;
    if employee.is_none() {
        return Err(employee_not_found(employee_id));
    }

    let allocations = persistence.list_allocations_with_types(employee_id, year)?;
    let pending: Vec<LeaveRequest> = persistence.list_pending_requests_for_employee(employee_id)?;

    let balances: Vec<LeaveBalance> = allocations
        .iter()
        .map(|(allocation, leave_type)| {
            calculate_leave_balance(allocation, &leave_type.name, &pending)
        })
        .collect();

    debug!(employee_id, year, count = balances.len(), "Built allocation summary");

    Ok(AllocationSummaryResponse {
        employee_id,
        year,
        balances,
    })
}

/// Submits a leave request for the caller.
///
/// # Arguments
///
/// * `persistence` - The store
/// * `config` - Ledger configuration (allocation-year policy)
/// * `authenticated_actor` - The submitting employee
/// * `request` - The submission form
/// * `now` - The submission timestamp
///
/// # Errors
///
/// Returns an error if the input is invalid, the leave type does not
/// exist, the dates overlap another pending request, no allocation exists
/// for the resolved year, or the effective balance is too small.
pub fn submit_leave_request(
    persistence: &mut Persistence,
    config: &LedgerConfig,
    authenticated_actor: &AuthenticatedActor,
    request: SubmitLeaveRequest,
    now: OffsetDateTime,
) -> Result<LeaveRequestResponse, ApiError> {
    let actor: Actor = authenticated_actor.to_core_actor();
    let today: Date = now.date();

    let command: SubmitLeave = SubmitLeave {
        leave_type_id: request.leave_type_id,
        start_date: parse_date_field(&request.start_date, "start_date")?,
        end_date: parse_date_field(&request.end_date, "end_date")?,
        reason: request.reason,
    };
    let validated: ValidatedSubmission =
        validate_submission(&command, today).map_err(translate_core_error)?;
    let year: i32 = config.allocation_year(today, &validated.dates);

    let result = persistence.transaction(|tx| -> Result<LeaveRequest, ApiError> {
        let leave_type_id: i64 = validated.leave_type_id;
        let leave_type = tx
            .get_leave_type(leave_type_id)?
            .ok_or(CoreError::LeaveTypeNotFound(leave_type_id))?;
        let allocation =
            tx.find_allocation(AllocationKey::new(actor.employee_id, leave_type_id, year))?;
        let pending_requests = tx.list_pending_requests_for_employee(actor.employee_id)?;

        let context: SubmissionContext = SubmissionContext {
            leave_type,
            allocation,
            pending_requests,
        };
        let new_request: NewLeaveRequest = apply_submission(&actor, validated, &context, year, now)?;

        let request_id: i64 = tx.insert_request(&new_request)?;
        tx.find_request(request_id)?
            .ok_or_else(|| CoreError::RequestNotFound(request_id).into())
    });

    let stored: LeaveRequest = result.inspect_err(|err| {
        warn!(employee_id = actor.employee_id, year, error = %err, "Leave request refused");
    })?;

    info!(
        request_id = stored.request_id,
        employee_id = stored.employee_id,
        days = stored.days,
        "Leave request submitted"
    );

    Ok(LeaveRequestResponse {
        request: LeaveRequestInfo::from(&stored),
        message: String::from("Leave request submitted successfully"),
    })
}

/// Approves a pending leave request and debits the allocation.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the comment is too
/// long, the request is missing or not pending, or the allocation is
/// missing or cannot cover the request.
pub fn approve_leave_request(
    persistence: &mut Persistence,
    config: &LedgerConfig,
    authenticated_actor: &AuthenticatedActor,
    request_id: i64,
    request: ReviewLeaveRequest,
    now: OffsetDateTime,
) -> Result<LeaveRequestResponse, ApiError> {
    let review: Review = Review::Approve {
        admin_comment: request.admin_comment,
    };
    let stored: LeaveRequest =
        review_leave_request(persistence, config, authenticated_actor, request_id, review, now)?;

    Ok(LeaveRequestResponse {
        request: LeaveRequestInfo::from(&stored),
        message: String::from("Leave request approved"),
    })
}

/// Rejects a pending leave request. A comment is required.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the comment is blank
/// or too long, or the request is missing or not pending.
pub fn reject_leave_request(
    persistence: &mut Persistence,
    config: &LedgerConfig,
    authenticated_actor: &AuthenticatedActor,
    request_id: i64,
    request: ReviewLeaveRequest,
    now: OffsetDateTime,
) -> Result<LeaveRequestResponse, ApiError> {
    let review: Review = Review::Reject {
        admin_comment: request.admin_comment.unwrap_or_default(),
    };
    let stored: LeaveRequest =
        review_leave_request(persistence, config, authenticated_actor, request_id, review, now)?;

    Ok(LeaveRequestResponse {
        request: LeaveRequestInfo::from(&stored),
        message: String::from("Leave request rejected"),
    })
}

fn review_leave_request(
    persistence: &mut Persistence,
    config: &LedgerConfig,
    authenticated_actor: &AuthenticatedActor,
    request_id: i64,
    review: Review,
    now: OffsetDateTime,
) -> Result<LeaveRequest, ApiError> {
    let actor: Actor = authenticated_actor.to_core_actor();
    actor
        .require_admin(review.action())
        .map_err(translate_core_error)?;

    let result = persistence.transaction(|tx| -> Result<LeaveRequest, ApiError> {
        let request: LeaveRequest = tx
            .find_request(request_id)?
            .ok_or(CoreError::RequestNotFound(request_id))?;
        let leave_type = tx
            .get_leave_type(request.leave_type_id)?
            .ok_or(CoreError::LeaveTypeNotFound(request.leave_type_id))?;
        let year: i32 = config.allocation_year(now.date(), &request.dates);
        let allocation = tx.find_allocation(AllocationKey::new(
            request.employee_id,
            request.leave_type_id,
            year,
        ))?;

        let decision: ReviewDecision = apply_review(
            &actor,
            &request,
            allocation.as_ref(),
            &leave_type.name,
            year,
            review,
            now,
        )?;
        tx.apply_review_decision(&decision)?;

        tx.find_request(request_id)?
            .ok_or_else(|| CoreError::RequestNotFound(request_id).into())
    });

    let stored: LeaveRequest = result.inspect_err(|err| {
        warn!(request_id, error = %err, "Review refused");
    })?;

    info!(
        request_id,
        reviewer = actor.employee_id,
        status = %stored.status,
        "Leave request reviewed"
    );
    Ok(stored)
}

/// Withdraws one of the caller's pending requests.
///
/// Requests that do not exist, belong to someone else, or are no longer
/// pending all produce the same not-found error.
///
/// # Errors
///
/// Returns `ResourceNotFound` unless the caller owns a pending request
/// with this ID.
pub fn delete_leave_request(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    request_id: i64,
    now: OffsetDateTime,
) -> Result<DeleteLeaveRequestResponse, ApiError> {
    let actor: Actor = authenticated_actor.to_core_actor();

    persistence.transaction(|tx| -> Result<(), ApiError> {
        let request: Option<LeaveRequest> = tx.find_request(request_id)?;
        apply_withdrawal(&actor, request_id, request.as_ref())?;

        if !tx.soft_delete_pending_request(request_id, actor.employee_id, now)? {
            return Err(CoreError::NotFoundOrNotDeletable { request_id }.into());
        }
        Ok(())
    })?;

    info!(request_id, employee_id = actor.employee_id, "Leave request withdrawn");

    Ok(DeleteLeaveRequestResponse {
        request_id,
        message: String::from("Leave request deleted successfully"),
    })
}

/// Lists leave requests visible to the caller, newest first.
///
/// Admins see every request and may filter by employee; employees only
/// ever see their own.
///
/// # Errors
///
/// Returns an error if the status filter is unknown or the store fails.
pub fn list_leave_requests(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    query: &ListLeaveRequestsQuery,
) -> Result<ListLeaveRequestsResponse, ApiError> {
    let status: Option<LeaveStatus> = match query.status.as_deref() {
        Some(value) if !value.trim().is_empty() => {
            Some(LeaveStatus::from_str(value).map_err(translate_domain_error)?)
        }
        _ => None,
    };
    let employee_id: Option<i64> = match authenticated_actor.role {
        Role::Admin => query.employee_id,
        Role::Employee => Some(authenticated_actor.employee_id),
    };

    let requests: Vec<LeaveRequest> =
        persistence.list_requests(RequestFilter { status, employee_id })?;

    debug!(count = requests.len(), "Listed leave requests");

    Ok(ListLeaveRequestsResponse {
        requests: requests.iter().map(LeaveRequestInfo::from).collect(),
    })
}

/// Retrieves one leave request. Only the owner or an admin may see it.
///
/// # Errors
///
/// Returns an error if the request does not exist or the caller may not
/// view it.
pub fn get_leave_request(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    request_id: i64,
) -> Result<LeaveRequestInfo, ApiError> {
    let request: LeaveRequest = persistence
        .find_request(request_id)?
        .ok_or(CoreError::RequestNotFound(request_id))?;
    AuthorizationService::authorize_view_employee(authenticated_actor, request.employee_id)?;

    Ok(LeaveRequestInfo::from(&request))
}

/// Lists every date covered by the caller's pending requests.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn get_disabled_dates(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<DisabledDatesResponse, ApiError> {
    let pending: Vec<LeaveRequest> =
        persistence.list_pending_requests_for_employee(authenticated_actor.employee_id)?;

    let dates: BTreeSet<Date> = pending
        .iter()
        .flat_map(|request| request.dates.dates())
        .collect();

    Ok(DisabledDatesResponse {
        dates: dates.into_iter().map(format_date).collect(),
    })
}

impl From<StatusCounts> for StatusCountsInfo {
    fn from(counts: StatusCounts) -> Self {
        Self {
            pending: counts.pending,
            approved: counts.approved,
            rejected: counts.rejected,
            total: counts.total(),
        }
    }
}

/// Gathers dashboard statistics for the caller's role.
///
/// Admins get system-wide counts; employees get their own counts and the
/// approved days whose start date falls in the current year.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn get_dashboard(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    today: Date,
) -> Result<DashboardResponse, ApiError> {
    match authenticated_actor.role {
        Role::Admin => {
            let dashboard: AdminDashboard = persistence.admin_dashboard(today)?;
            Ok(DashboardResponse::Admin(AdminDashboardInfo {
                counts: dashboard.counts.into(),
                total_employees: dashboard.total_employees,
                pending_today: dashboard.pending_today,
                recent_pending: dashboard
                    .recent_pending
                    .iter()
                    .map(LeaveRequestInfo::from)
                    .collect(),
            }))
        }
        Role::Employee => {
            let year: i32 = today.year();
            let dashboard: EmployeeDashboard =
                persistence.employee_dashboard(authenticated_actor.employee_id, year)?;
            Ok(DashboardResponse::Employee(EmployeeDashboardInfo {
                year,
                counts: dashboard.counts.into(),
                approved_days: dashboard.approved_days,
                recent_requests: dashboard
                    .recent_requests
                    .iter()
                    .map(LeaveRequestInfo::from)
                    .collect(),
            }))
        }
    }
}

/// Grants or resets the standard quotas of every employee for `year`.
///
/// This is the unauthenticated entry point used by the scheduled
/// `allocate` command. All rows are written in one transaction.
///
/// # Errors
///
/// Returns an error if the year is out of range, the reference leave
/// types are missing, or the store fails.
pub fn allocate_year(
    persistence: &mut Persistence,
    year: i32,
) -> Result<BootstrapSummary, ApiError> {
    let summary: BootstrapSummary = persistence.transaction(|tx| -> Result<_, ApiError> {
        let employees: Vec<Employee> = tx.list_employees_by_role(Role::Employee)?;
        let leave_types = tx.list_leave_types()?;
        let plan: YearlyAllocationPlan = plan_yearly_allocations(year, &employees, &leave_types)?;

        let mut summary: BootstrapSummary = plan.summary();
        for grant in plan.grants {
            summary.record(tx.upsert_allocation(grant)?);
        }
        Ok(summary)
    })?;

    info!(
        year,
        created = summary.created,
        updated = summary.updated,
        employees = summary.employees_processed,
        "Yearly allocation completed"
    );
    Ok(summary)
}

/// Runs the yearly allocation on behalf of an admin.
///
/// # Arguments
///
/// * `persistence` - The store
/// * `authenticated_actor` - The caller (must be an admin)
/// * `request` - The year to allocate, defaulting to the current year
/// * `today` - The current date
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the run fails.
pub fn run_yearly_allocation(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    request: RunAllocationRequest,
    today: Date,
) -> Result<RunAllocationResponse, ApiError> {
    AuthorizationService::authorize_run_yearly_allocation(authenticated_actor)?;

    let year: i32 = request.year.unwrap_or_else(|| today.year());
    let summary: BootstrapSummary = allocate_year(persistence, year)?;

    Ok(RunAllocationResponse {
        year,
        created: summary.created,
        updated: summary.updated,
        employees_processed: summary.employees_processed,
        message: format!(
            "Allocated leave for {} employees for year {year}",
            summary.employees_processed
        ),
    })
}
