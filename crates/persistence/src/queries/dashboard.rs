// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Count and aggregation queries backing the dashboards.

use diesel::dsl::sum;
use diesel::prelude::*;
use leaves_domain::{LeaveStatus, format_date};
use time::Date;

use crate::data_models::StatusCounts;
use crate::diesel_schema::leave_requests;
use crate::error::PersistenceError;

/// Counts live requests per status, optionally for one employee.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn count_requests_by_status(
    conn: &mut SqliteConnection,
    employee_id: Option<i64>,
) -> Result<StatusCounts, PersistenceError> {
    Ok(StatusCounts {
        pending: count_with_status(conn, LeaveStatus::Pending, employee_id)?,
        approved: count_with_status(conn, LeaveStatus::Approved, employee_id)?,
        rejected: count_with_status(conn, LeaveStatus::Rejected, employee_id)?,
    })
}

fn count_with_status(
    conn: &mut SqliteConnection,
    status: LeaveStatus,
    employee_id: Option<i64>,
) -> Result<i64, PersistenceError> {
    let mut query = leave_requests::table
        .filter(leave_requests::deleted_at.is_null())
        .filter(leave_requests::status.eq(status.as_str()))
        .into_boxed();

    if let Some(employee_id) = employee_id {
        query = query.filter(leave_requests::employee_id.eq(employee_id));
    }

    Ok(query.count().get_result(conn)?)
}

/// Counts pending requests created on `date` (UTC).
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_pending_created_on(
    conn: &mut SqliteConnection,
    date: Date,
) -> Result<i64, PersistenceError> {
    let prefix: String = format!("{}%", format_date(date));

    Ok(leave_requests::table
        .filter(leave_requests::deleted_at.is_null())
        .filter(leave_requests::status.eq(LeaveStatus::Pending.as_str()))
        .filter(leave_requests::created_at.like(prefix))
        .count()
        .get_result(conn)?)
}

/// Sums the days of an employee's approved requests starting in `year`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn sum_approved_days_in_year(
    conn: &mut SqliteConnection,
    employee_id: i64,
    year: i32,
) -> Result<i64, PersistenceError> {
    let total: Option<i64> = leave_requests::table
        .filter(leave_requests::deleted_at.is_null())
        .filter(leave_requests::employee_id.eq(employee_id))
        .filter(leave_requests::status.eq(LeaveStatus::Approved.as_str()))
        .filter(leave_requests::start_date.like(format!("{year:04}-%")))
        .select(sum(leave_requests::days))
        .first(conn)?;

    Ok(total.unwrap_or(0))
}
