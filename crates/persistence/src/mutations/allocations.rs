// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use leaves::{AllocationGrant, Debit, UpsertOutcome};
use tracing::{debug, info, warn};

use crate::diesel_schema::leave_allocations;
use crate::error::PersistenceError;

/// Creates or resets an allocation.
///
/// A new row gets `total_allocated = remaining = total_days`. An existing
/// row is overwritten with the same values in place; previous debits are
/// discarded and the allocation ID is kept. The write is a single
/// `INSERT .. ON CONFLICT (employee_id, leave_type_id, year) DO UPDATE`.
///
/// # Errors
///
/// Returns an error if the lookup or the write fails.
pub fn upsert_allocation(
    conn: &mut SqliteConnection,
    grant: AllocationGrant,
) -> Result<UpsertOutcome, PersistenceError> {
    let key = grant.key;
    let existing: Option<i64> = leave_allocations::table
        .filter(leave_allocations::employee_id.eq(key.employee_id))
        .filter(leave_allocations::leave_type_id.eq(key.leave_type_id))
        .filter(leave_allocations::year.eq(key.year))
        .select(leave_allocations::allocation_id)
        .first(conn)
        .optional()?;

    diesel::insert_into(leave_allocations::table)
        .values((
            leave_allocations::employee_id.eq(key.employee_id),
            leave_allocations::leave_type_id.eq(key.leave_type_id),
            leave_allocations::year.eq(key.year),
            leave_allocations::total_allocated.eq(grant.total_days),
            leave_allocations::remaining.eq(grant.total_days),
        ))
        .on_conflict((
            leave_allocations::employee_id,
            leave_allocations::leave_type_id,
            leave_allocations::year,
        ))
        .do_update()
        .set((
            leave_allocations::total_allocated.eq(grant.total_days),
            leave_allocations::remaining.eq(grant.total_days),
        ))
        .execute(conn)?;

    debug!(
        employee_id = key.employee_id,
        leave_type_id = key.leave_type_id,
        year = key.year,
        total_days = grant.total_days,
        reset = existing.is_some(),
        "Upserted allocation"
    );

    Ok(existing.map_or(UpsertOutcome::Created, |_| UpsertOutcome::Updated))
}

/// Subtracts `debit.days` from an allocation's remaining days.
///
/// The update only applies while `remaining >= days`.
///
/// # Errors
///
/// Returns `PersistenceError::ConditionalUpdateFailed` if the allocation
/// is missing or does not have enough remaining days.
pub fn debit_allocation(conn: &mut SqliteConnection, debit: Debit) -> Result<(), PersistenceError> {
    let key = debit.key;

    let affected: usize = diesel::update(leave_allocations::table)
        .filter(leave_allocations::employee_id.eq(key.employee_id))
        .filter(leave_allocations::leave_type_id.eq(key.leave_type_id))
        .filter(leave_allocations::year.eq(key.year))
        .filter(leave_allocations::remaining.ge(debit.days))
        .set(leave_allocations::remaining.eq(leave_allocations::remaining - debit.days))
        .execute(conn)?;

    if affected == 0 {
        warn!(
            employee_id = key.employee_id,
            leave_type_id = key.leave_type_id,
            year = key.year,
            days = debit.days,
            "Allocation debit guard did not match"
        );
        return Err(PersistenceError::ConditionalUpdateFailed(format!(
            "allocation for employee {} / leave type {} / {} cannot cover {} days",
            key.employee_id, key.leave_type_id, key.year, debit.days
        )));
    }

    info!(
        employee_id = key.employee_id,
        leave_type_id = key.leave_type_id,
        year = key.year,
        days = debit.days,
        "Debited allocation"
    );
    Ok(())
}
