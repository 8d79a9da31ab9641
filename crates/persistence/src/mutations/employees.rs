// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use leaves_domain::{Role, format_date};
use time::Date;
use tracing::{info, warn};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Fields of a new employee. Values are expected to be validated already.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    /// Lowercase email.
    pub email: String,
    pub department: Option<String>,
    pub join_date: Date,
    pub role: Role,
}

/// Inserts an employee and returns its ID.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the email is taken, or
/// another error if the insert fails.
pub fn insert_employee(
    conn: &mut SqliteConnection,
    employee: &NewEmployee,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(employees::table)
        .values((
            employees::name.eq(&employee.name),
            employees::email.eq(&employee.email),
            employees::department.eq(employee.department.as_deref()),
            employees::join_date.eq(format_date(employee.join_date)),
            employees::role.eq(employee.role.as_str()),
        ))
        .execute(conn)?;

    let employee_id: i64 = get_last_insert_rowid(conn)?;

    info!(employee_id, role = employee.role.as_str(), "Created employee");

    Ok(employee_id)
}

/// Editable fields of an existing employee. Values are expected to be
/// validated already.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeChanges {
    pub name: String,
    /// Lowercase email.
    pub email: String,
    pub department: Option<String>,
    pub join_date: Date,
}

/// Overwrites the editable fields of an employee-role user.
///
/// Returns `false` if no employee-role user has this ID.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the email belongs to
/// someone else, or another error if the update fails.
pub fn update_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    changes: &EmployeeChanges,
) -> Result<bool, PersistenceError> {
    let affected: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .filter(employees::role.eq(Role::Employee.as_str()))
        .set((
            employees::name.eq(&changes.name),
            employees::email.eq(&changes.email),
            employees::department.eq(changes.department.as_deref()),
            employees::join_date.eq(format_date(changes.join_date)),
        ))
        .execute(conn)?;

    if affected == 0 {
        warn!(employee_id, "No employee to update");
        return Ok(false);
    }

    info!(employee_id, "Updated employee");
    Ok(true)
}

/// Deletes an employee-role user. Their allocations and leave requests
/// are removed with them.
///
/// Returns `false` if no employee-role user has this ID.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<bool, PersistenceError> {
    let affected: usize = diesel::delete(
        employees::table
            .filter(employees::employee_id.eq(employee_id))
            .filter(employees::role.eq(Role::Employee.as_str())),
    )
    .execute(conn)?;

    if affected == 0 {
        warn!(employee_id, "No employee to delete");
        return Ok(false);
    }

    info!(employee_id, "Deleted employee");
    Ok(true)
}
