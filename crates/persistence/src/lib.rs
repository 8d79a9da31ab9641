// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Leaves system.
//!
//! This crate stores employees, leave types, allocations and leave
//! requests in `SQLite` through Diesel. The schema is created by embedded
//! migrations when a store is opened.
//!
//! ## Transactions
//!
//! Reads that only feed a response go through `Persistence` directly.
//! Anything that decides and then writes goes through
//! `Persistence::transaction`, which runs the closure inside one
//! `IMMEDIATE` transaction and rolls back when it returns an error.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory` gives every caller a separate shared
//! in-memory database, so tests never observe each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use leaves_domain::{Allocation, Employee, LeavePeriod, LeaveRequest, LeaveType, Role};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;
use tracing::debug;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod transaction;

#[cfg(test)]
mod tests;

pub use data_models::{
    AdminDashboard, EmployeeDashboard, EmployeeLeaveSummary, RequestFilter, StatusCounts,
};
pub use error::PersistenceError;
pub use mutations::employees::{EmployeeChanges, NewEmployee};
pub use transaction::LedgerTransaction;

/// Number of requests shown in a dashboard's recent list.
pub const RECENT_REQUEST_LIMIT: i64 = 5;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Adapts a caller error type to Diesel's transaction API.
enum TxError<E> {
    Inner(E),
    Diesel(diesel::result::Error),
}

impl<E> From<diesel::result::Error> for TxError<E> {
    fn from(err: diesel::result::Error) -> Self {
        Self::Diesel(err)
    }
}

/// The `SQLite` store.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a store backed by a fresh shared in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:leaves_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a store backed by a database file, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Runs `f` inside one `IMMEDIATE` transaction.
    ///
    /// The transaction commits when `f` returns `Ok` and rolls back when it
    /// returns `Err`. Database failures while opening or committing are
    /// converted through `PersistenceError`.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or a converted `PersistenceError`.
    pub fn transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut LedgerTransaction<'_>) -> Result<T, E>,
        E: From<PersistenceError>,
    {
        self.conn
            .immediate_transaction::<T, TxError<E>, _>(|conn| {
                let mut tx = LedgerTransaction { conn };
                f(&mut tx).map_err(TxError::Inner)
            })
            .map_err(|err| match err {
                TxError::Inner(inner) => inner,
                TxError::Diesel(diesel_err) => E::from(PersistenceError::from(diesel_err)),
            })
    }

    /// Inserts the `Sick` and `Casual` leave types if they are missing.
    ///
    /// # Errors
    ///
    /// Returns an error if an insert fails.
    pub fn seed_reference_data(&mut self) -> Result<usize, PersistenceError> {
        mutations::leave_types::seed_leave_types(&mut self.conn)
    }

    /// Retrieves an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_employee(&mut self, employee_id: i64) -> Result<Option<Employee>, PersistenceError> {
        queries::employees::get_employee(&mut self.conn, employee_id)
    }

    /// Lists employees holding `role`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_employees_by_role(&mut self, role: Role) -> Result<Vec<Employee>, PersistenceError> {
        queries::employees::list_employees_by_role(&mut self.conn, role)
    }

    /// Lists employee-role users with their approved days, optionally
    /// only those with approved leave starting in `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn list_employees_with_approved_days(
        &mut self,
        period: Option<LeavePeriod>,
    ) -> Result<Vec<EmployeeLeaveSummary>, PersistenceError> {
        queries::employees::list_employees_with_approved_days(&mut self.conn, period)
    }

    /// Lists every leave type.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_leave_types(&mut self) -> Result<Vec<LeaveType>, PersistenceError> {
        queries::leave_types::list_leave_types(&mut self.conn)
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
        queries::leave_types::get_leave_type(&mut self.conn, leave_type_id)
    }

    /// Lists an employee's allocations for `year` with their leave types.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_allocations_with_types(
        &mut self,
        employee_id: i64,
        year: i32,
    ) -> Result<Vec<(Allocation, LeaveType)>, PersistenceError> {
        queries::allocations::list_allocations_with_types(&mut self.conn, employee_id, year)
    }

    /// Retrieves a live request by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_request(&mut self, request_id: i64) -> Result<Option<LeaveRequest>, PersistenceError> {
        queries::requests::find_request(&mut self.conn, request_id)
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
        queries::requests::list_pending_requests_for_employee(&mut self.conn, employee_id)
    }

    /// Lists live requests matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_requests(
        &mut self,
        filter: RequestFilter,
    ) -> Result<Vec<LeaveRequest>, PersistenceError> {
        queries::requests::list_requests(&mut self.conn, filter, None)
    }

    /// Gathers the admin dashboard statistics.
    ///
    /// # Arguments
    ///
    /// * `today` - The date used for the "submitted today" count
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn admin_dashboard(&mut self, today: Date) -> Result<AdminDashboard, PersistenceError> {
        debug!("Gathering admin dashboard");

        Ok(AdminDashboard {
            counts: queries::dashboard::count_requests_by_status(&mut self.conn, None)?,
            total_employees: queries::employees::count_employees_by_role(&mut self.conn, Role::Employee)?,
            pending_today: queries::dashboard::count_pending_created_on(&mut self.conn, today)?,
            recent_pending: queries::requests::list_requests(
                &mut self.conn,
                RequestFilter {
                    status: Some(leaves_domain::LeaveStatus::Pending),
                    employee_id: None,
                },
                Some(RECENT_REQUEST_LIMIT),
            )?,
        })
    }

    /// Gathers an employee's dashboard statistics.
    ///
    /// # Arguments
    ///
    /// * `employee_id` - The employee
    /// * `year` - The year whose approved days are summed
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn employee_dashboard(
        &mut self,
        employee_id: i64,
        year: i32,
    ) -> Result<EmployeeDashboard, PersistenceError> {
        debug!(employee_id, year, "Gathering employee dashboard");

        Ok(EmployeeDashboard {
            counts: queries::dashboard::count_requests_by_status(&mut self.conn, Some(employee_id))?,
            approved_days: queries::dashboard::sum_approved_days_in_year(
                &mut self.conn,
                employee_id,
                year,
            )?,
            recent_requests: queries::requests::list_requests(
                &mut self.conn,
                RequestFilter {
                    status: None,
                    employee_id: Some(employee_id),
                },
                Some(RECENT_REQUEST_LIMIT),
            )?,
        })
    }
}
