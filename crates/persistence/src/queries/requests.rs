// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave request reads.
//!
//! Every query here ignores soft-deleted rows.

use diesel::prelude::*;
use leaves_domain::{LeaveRequest, LeaveStatus};
use tracing::debug;

use crate::data_models::{LeaveRequestRow, RequestFilter};
use crate::diesel_schema::leave_requests;
use crate::error::PersistenceError;

/// Retrieves a request by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
/// Returns `Ok(None)` if the request does not exist or was deleted.
pub fn find_request(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<Option<LeaveRequest>, PersistenceError> {
    debug!(request_id, "Looking up leave request");

    leave_requests::table
        .filter(leave_requests::request_id.eq(request_id))
        .filter(leave_requests::deleted_at.is_null())
        .select(LeaveRequestRow::as_select())
        .first(conn)
        .optional()?
        .map(LeaveRequestRow::into_domain)
        .transpose()
}

/// Lists an employee's pending requests across all leave types, ordered
/// by start date.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_pending_requests_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<LeaveRequest>, PersistenceError> {
    let rows: Vec<LeaveRequestRow> = leave_requests::table
        .filter(leave_requests::employee_id.eq(employee_id))
        .filter(leave_requests::status.eq(LeaveStatus::Pending.as_str()))
        .filter(leave_requests::deleted_at.is_null())
        .order((leave_requests::start_date.asc(), leave_requests::request_id.asc()))
        .select(LeaveRequestRow::as_select())
        .load(conn)?;

    debug!(employee_id, count = rows.len(), "Loaded pending requests");

    rows.into_iter().map(LeaveRequestRow::into_domain).collect()
}

/// Lists requests matching `filter`, newest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `filter` - Optional status and employee restrictions
/// * `limit` - Maximum number of rows, or `None` for all
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_requests(
    conn: &mut SqliteConnection,
    filter: RequestFilter,
    limit: Option<i64>,
) -> Result<Vec<LeaveRequest>, PersistenceError> {
    let mut query = leave_requests::table
        .filter(leave_requests::deleted_at.is_null())
        .select(LeaveRequestRow::as_select())
        .order((
            leave_requests::created_at.desc(),
            leave_requests::request_id.desc(),
        ))
        .into_boxed();

    if let Some(status) = filter.status {
        query = query.filter(leave_requests::status.eq(status.as_str()));
    }
    if let Some(employee_id) = filter.employee_id {
        query = query.filter(leave_requests::employee_id.eq(employee_id));
    }
    if let Some(limit) = limit {
        query = query.limit(limit);
    }

    let rows: Vec<LeaveRequestRow> = query.load(conn)?;
    rows.into_iter().map(LeaveRequestRow::into_domain).collect()
}
