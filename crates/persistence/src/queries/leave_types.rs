// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use leaves_domain::LeaveType;

use crate::data_models::LeaveTypeRow;
use crate::diesel_schema::leave_types;
use crate::error::PersistenceError;

/// Retrieves a leave type by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_leave_type(
    conn: &mut SqliteConnection,
    leave_type_id: i64,
) -> Result<Option<LeaveType>, PersistenceError> {
    Ok(leave_types::table
        .filter(leave_types::leave_type_id.eq(leave_type_id))
        .select(LeaveTypeRow::as_select())
        .first(conn)
        .optional()?
        .map(LeaveType::from))
}

/// Lists every leave type, ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_leave_types(conn: &mut SqliteConnection) -> Result<Vec<LeaveType>, PersistenceError> {
    let rows: Vec<LeaveTypeRow> = leave_types::table
        .order(leave_types::leave_type_id.asc())
        .select(LeaveTypeRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(LeaveType::from).collect())
}
