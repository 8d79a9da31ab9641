// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use leaves_domain::STANDARD_QUOTAS;
use tracing::info;

use crate::diesel_schema::leave_types;
use crate::error::PersistenceError;

/// Inserts the standard leave types that do not exist yet.
///
/// Existing rows are left untouched.
///
/// # Returns
///
/// The number of rows inserted.
///
/// # Errors
///
/// Returns an error if an insert fails.
pub fn seed_leave_types(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    let mut inserted: usize = 0;

    for quota in &STANDARD_QUOTAS {
        let description: String = format!("{} leave", quota.leave_type_name);
        inserted += diesel::insert_or_ignore_into(leave_types::table)
            .values((
                leave_types::name.eq(quota.leave_type_name),
                leave_types::description.eq(Some(description)),
            ))
            .execute(conn)?;
    }

    info!(inserted, "Seeded leave types");

    Ok(inserted)
}
