// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use leaves::{NewLeaveRequest, ReviewDecision};
use leaves_domain::{LeaveStatus, format_date};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::format_timestamp;
use crate::diesel_schema::leave_requests;
use crate::error::PersistenceError;

/// Inserts a new pending request and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_request(
    conn: &mut SqliteConnection,
    request: &NewLeaveRequest,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(leave_requests::table)
        .values((
            leave_requests::employee_id.eq(request.employee_id),
            leave_requests::leave_type_id.eq(request.leave_type_id),
            leave_requests::start_date.eq(format_date(request.dates.start_date())),
            leave_requests::end_date.eq(format_date(request.dates.end_date())),
            leave_requests::days.eq(request.days),
            leave_requests::reason.eq(&request.reason),
            leave_requests::status.eq(request.status.as_str()),
            leave_requests::created_at.eq(format_timestamp(request.created_at)?),
        ))
        .execute(conn)?;

    let request_id: i64 = get_last_insert_rowid(conn)?;

    info!(
        request_id,
        employee_id = request.employee_id,
        leave_type_id = request.leave_type_id,
        days = request.days,
        "Created leave request"
    );

    Ok(request_id)
}

/// Moves a pending request to the decision's terminal status.
///
/// The update only matches while the row is still pending.
///
/// # Errors
///
/// Returns `PersistenceError::ConditionalUpdateFailed` if the request is no
/// longer pending (or was deleted).
pub fn apply_review_decision(
    conn: &mut SqliteConnection,
    decision: &ReviewDecision,
) -> Result<(), PersistenceError> {
    let approved_at: Option<String> = decision.approved_at.map(format_timestamp).transpose()?;

    let affected: usize = diesel::update(leave_requests::table)
        .filter(leave_requests::request_id.eq(decision.request_id))
        .filter(leave_requests::status.eq(LeaveStatus::Pending.as_str()))
        .filter(leave_requests::deleted_at.is_null())
        .set((
            leave_requests::status.eq(decision.status.as_str()),
            leave_requests::admin_comment.eq(decision.admin_comment.as_deref()),
            leave_requests::approved_by.eq(decision.approved_by),
            leave_requests::approved_at.eq(approved_at),
        ))
        .execute(conn)?;

    if affected == 0 {
        warn!(request_id = decision.request_id, "Request was no longer pending");
        return Err(PersistenceError::ConditionalUpdateFailed(format!(
            "leave request {} is no longer pending",
            decision.request_id
        )));
    }

    info!(
        request_id = decision.request_id,
        status = decision.status.as_str(),
        "Reviewed leave request"
    );
    Ok(())
}

/// Soft-deletes a pending request owned by `employee_id`.
///
/// # Returns
///
/// `true` if a row was deleted, `false` if nothing matched.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn soft_delete_pending_request(
    conn: &mut SqliteConnection,
    request_id: i64,
    employee_id: i64,
    deleted_at: OffsetDateTime,
) -> Result<bool, PersistenceError> {
    let affected: usize = diesel::update(leave_requests::table)
        .filter(leave_requests::request_id.eq(request_id))
        .filter(leave_requests::employee_id.eq(employee_id))
        .filter(leave_requests::status.eq(LeaveStatus::Pending.as_str()))
        .filter(leave_requests::deleted_at.is_null())
        .set(leave_requests::deleted_at.eq(Some(format_timestamp(deleted_at)?)))
        .execute(conn)?;

    if affected > 0 {
        info!(request_id, employee_id, "Deleted pending leave request");
    }

    Ok(affected > 0)
}
