// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use leaves_domain::{Allocation, AllocationKey, LeaveType};
use tracing::debug;

use crate::data_models::{AllocationRow, LeaveTypeRow};
use crate::diesel_schema::{leave_allocations, leave_types};
use crate::error::PersistenceError;

/// Retrieves the allocation identified by `key`.
///
/// # Errors
///
/// Returns an error if the query fails or the stored counters are out of
/// range.
pub fn find_allocation(
    conn: &mut SqliteConnection,
    key: AllocationKey,
) -> Result<Option<Allocation>, PersistenceError> {
    debug!(
        employee_id = key.employee_id,
        leave_type_id = key.leave_type_id,
        year = key.year,
        "Looking up allocation"
    );

    leave_allocations::table
        .filter(leave_allocations::employee_id.eq(key.employee_id))
        .filter(leave_allocations::leave_type_id.eq(key.leave_type_id))
        .filter(leave_allocations::year.eq(key.year))
        .select(AllocationRow::as_select())
        .first(conn)
        .optional()?
        .map(AllocationRow::into_domain)
        .transpose()
}

/// Lists an employee's allocations for `year` with their leave types,
/// ordered by leave type ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_allocations_with_types(
    conn: &mut SqliteConnection,
    employee_id: i64,
    year: i32,
) -> Result<Vec<(Allocation, LeaveType)>, PersistenceError> {
    let rows: Vec<(AllocationRow, LeaveTypeRow)> = leave_allocations::table
        .inner_join(leave_types::table)
        .filter(leave_allocations::employee_id.eq(employee_id))
        .filter(leave_allocations::year.eq(year))
        .order(leave_allocations::leave_type_id.asc())
        .select((AllocationRow::as_select(), LeaveTypeRow::as_select()))
        .load(conn)?;

    rows.into_iter()
        .map(|(allocation, leave_type)| Ok((allocation.into_domain()?, LeaveType::from(leave_type))))
        .collect()
}
