// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transactional access to the ledger.
//!
//! A `LedgerTransaction` only exists inside `Persistence::transaction`,
//! which opens an `IMMEDIATE` transaction. Returning an error from the
//! closure rolls back every write made through it.

use diesel::SqliteConnection;
use leaves::{AllocationGrant, Debit, NewLeaveRequest, ReviewDecision, UpsertOutcome};
use leaves_domain::{Allocation, AllocationKey, Employee, LeaveRequest, LeaveType, Role};
use time::OffsetDateTime;

use crate::error::PersistenceError;
use crate::mutations::employees::{EmployeeChanges, NewEmployee};
use crate::{mutations, queries};

/// Reads and writes that share one database transaction.
pub struct LedgerTransaction<'a> {
    pub(crate) conn: &'a mut SqliteConnection,
}

impl LedgerTransaction<'_> {
    /// Retrieves an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_employee(&mut self, employee_id: i64) -> Result<Option<Employee>, PersistenceError> {
        queries::employees::get_employee(self.conn, employee_id)
    }

    /// Retrieves an employee by normalized email.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_employee_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<Employee>, PersistenceError> {
        queries::employees::find_employee_by_email(self.conn, email)
    }

    /// Lists employees holding `role`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_employees_by_role(&mut self, role: Role) -> Result<Vec<Employee>, PersistenceError> {
        queries::employees::list_employees_by_role(self.conn, role)
    }

    /// Retrieves a leave type by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_leave_type(
        &mut self,
        leave_type_id: i64,
    ) -> Result<Option<LeaveType>, PersistenceError> {
        queries::leave_types::get_leave_type(self.conn, leave_type_id)
    }

    /// Lists every leave type.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_leave_types(&mut self) -> Result<Vec<LeaveType>, PersistenceError> {
        queries::leave_types::list_leave_types(self.conn)
    }

    /// Retrieves an allocation by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_allocation(
        &mut self,
        key: AllocationKey,
    ) -> Result<Option<Allocation>, PersistenceError> {
        queries::allocations::find_allocation(self.conn, key)
    }

    /// Retrieves a live request by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_request(&mut self, request_id: i64) -> Result<Option<LeaveRequest>, PersistenceError> {
        queries::requests::find_request(self.conn, request_id)
    }

    /// Lists an employee's pending requests across all leave types.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_pending_requests_for_employee(
        &mut self,
        employee_id: i64,
    ) -> Result<Vec<LeaveRequest>, PersistenceError> {
        queries::requests::list_pending_requests_for_employee(self.conn, employee_id)
    }

    /// Inserts an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is taken or the insert fails.
    pub fn insert_employee(&mut self, employee: &NewEmployee) -> Result<i64, PersistenceError> {
        mutations::employees::insert_employee(self.conn, employee)
    }

    /// Overwrites an employee's editable fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is taken or the update fails.
    pub fn update_employee(
        &mut self,
        employee_id: i64,
        changes: &EmployeeChanges,
    ) -> Result<bool, PersistenceError> {
        mutations::employees::update_employee(self.conn, employee_id, changes)
    }

    /// Deletes an employee together with their allocations and requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_employee(&mut self, employee_id: i64) -> Result<bool, PersistenceError> {
        mutations::employees::delete_employee(self.conn, employee_id)
    }

    /// Inserts a pending request.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_request(&mut self, request: &NewLeaveRequest) -> Result<i64, PersistenceError> {
        mutations::requests::insert_request(self.conn, request)
    }

    /// Applies a review decision: the guarded status change, then the
    /// guarded debit if the decision carries one.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConditionalUpdateFailed` if either guard
    /// fails.
    pub fn apply_review_decision(&mut self, decision: &ReviewDecision) -> Result<(), PersistenceError> {
        mutations::requests::apply_review_decision(self.conn, decision)?;
        if let Some(debit) = decision.debit {
            self.debit_allocation(debit)?;
        }
        Ok(())
    }

    /// Applies a guarded debit.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConditionalUpdateFailed` if the guard fails.
    pub fn debit_allocation(&mut self, debit: Debit) -> Result<(), PersistenceError> {
        mutations::allocations::debit_allocation(self.conn, debit)
    }

    /// Creates or resets an allocation.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_allocation(
        &mut self,
        grant: AllocationGrant,
    ) -> Result<UpsertOutcome, PersistenceError> {
        mutations::allocations::upsert_allocation(self.conn, grant)
    }

    /// Soft-deletes a pending request owned by `employee_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn soft_delete_pending_request(
        &mut self,
        request_id: i64,
        employee_id: i64,
        deleted_at: OffsetDateTime,
    ) -> Result<bool, PersistenceError> {
        mutations::requests::soft_delete_pending_request(
            self.conn,
            request_id,
            employee_id,
            deleted_at,
        )
    }
}
