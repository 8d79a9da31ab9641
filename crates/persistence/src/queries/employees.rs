// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use diesel::dsl::sum;
use diesel::prelude::*;
use leaves_domain::{Employee, LeavePeriod, LeaveStatus, Role};
use tracing::debug;

use crate::data_models::{EmployeeLeaveSummary, EmployeeRow};
use crate::diesel_schema::{employees, leave_requests};
use crate::error::PersistenceError;

/// Retrieves an employee by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
/// Returns `Ok(None)` if the employee does not exist.
pub fn get_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Option<Employee>, PersistenceError> {
    debug!(employee_id, "Looking up employee");

    employees::table
        .filter(employees::employee_id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?
        .map(EmployeeRow::into_domain)
        .transpose()
}

/// Retrieves an employee by (already normalized) email.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn find_employee_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<Employee>, PersistenceError> {
    employees::table
        .filter(employees::email.eq(email))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?
        .map(EmployeeRow::into_domain)
        .transpose()
}

/// Lists employees holding `role`, ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_employees_by_role(
    conn: &mut SqliteConnection,
    role: Role,
) -> Result<Vec<Employee>, PersistenceError> {
    let rows: Vec<EmployeeRow> = employees::table
        .filter(employees::role.eq(role.as_str()))
        .order(employees::employee_id.asc())
        .select(EmployeeRow::as_select())
        .load(conn)?;

    debug!(role = role.as_str(), count = rows.len(), "Loaded employees");

    rows.into_iter().map(EmployeeRow::into_domain).collect()
}

/// Counts employees holding `role`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_employees_by_role(
    conn: &mut SqliteConnection,
    role: Role,
) -> Result<i64, PersistenceError> {
    Ok(employees::table
        .filter(employees::role.eq(role.as_str()))
        .count()
        .get_result(conn)?)
}

/// Sums approved days per employee for requests whose start date begins
/// with `date_prefix`. An empty prefix matches every request.
///
/// Employees without approved requests are absent from the map.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn sum_approved_days_by_employee(
    conn: &mut SqliteConnection,
    date_prefix: &str,
) -> Result<HashMap<i64, i64>, PersistenceError> {
    let totals: Vec<(i64, Option<i64>)> = leave_requests::table
        .filter(leave_requests::deleted_at.is_null())
        .filter(leave_requests::status.eq(LeaveStatus::Approved.as_str()))
        .filter(leave_requests::start_date.like(format!("{date_prefix}%")))
        .group_by(leave_requests::employee_id)
        .select((leave_requests::employee_id, sum(leave_requests::days)))
        .load(conn)?;

    Ok(totals
        .into_iter()
        .map(|(employee_id, days)| (employee_id, days.unwrap_or(0)))
        .collect())
}

/// Lists employee-role users with their approved days.
///
/// Without a period every employee is listed with all of their approved
/// days. With a period only employees holding approved leave starting in
/// it are listed, and only that leave is summed.
///
/// # Errors
///
/// Returns an error if a query fails or a stored row is invalid.
pub fn list_employees_with_approved_days(
    conn: &mut SqliteConnection,
    period: Option<LeavePeriod>,
) -> Result<Vec<EmployeeLeaveSummary>, PersistenceError> {
    let date_prefix: String = period
        .as_ref()
        .map(LeavePeriod::date_prefix)
        .unwrap_or_default();
    let totals: HashMap<i64, i64> = sum_approved_days_by_employee(conn, &date_prefix)?;

    let summaries: Vec<EmployeeLeaveSummary> = list_employees_by_role(conn, Role::Employee)?
        .into_iter()
        .filter(|employee| period.is_none() || totals.contains_key(&employee.employee_id))
        .map(|employee| EmployeeLeaveSummary {
            approved_days: totals.get(&employee.employee_id).copied().unwrap_or(0),
            employee,
        })
        .collect();

    debug!(
        period = %date_prefix,
        count = summaries.len(),
        "Listed employees with approved leave"
    );

    Ok(summaries)
}
