// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod allocation_tests;

use leaves::{AllocationGrant, NewLeaveRequest, UpsertOutcome};
use leaves_domain::{AllocationKey, LeaveDates, LeaveStatus, LeaveType, Role, SICK_LEAVE};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

use crate::{NewEmployee, Persistence, PersistenceError};

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-02 09:30 UTC)
}

/// A seeded store with one employee (and their 2026 quotas) and one admin.
pub struct Fixture {
    pub persistence: Persistence,
    pub employee_id: i64,
    pub admin_id: i64,
    pub sick: LeaveType,
    pub casual: LeaveType,
}

pub fn new_employee(name: &str, email: &str, role: Role) -> NewEmployee {
    NewEmployee {
        name: name.to_string(),
        email: email.to_string(),
        department: Some(String::from("Engineering")),
        join_date: date!(2024 - 01 - 15),
        role,
    }
}

pub fn setup_fixture() -> Fixture {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence.seed_reference_data().unwrap();

    let leave_types = persistence.list_leave_types().unwrap();
    let sick = leave_types
        .iter()
        .find(|t| t.name == SICK_LEAVE)
        .cloned()
        .unwrap();
    let casual = leave_types
        .iter()
        .find(|t| t.name != SICK_LEAVE)
        .cloned()
        .unwrap();

    let (employee_id, admin_id) = persistence
        .transaction(|tx| {
            let employee_id =
                tx.insert_employee(&new_employee("Ada", "ada@example.com", Role::Employee))?;
            let admin_id =
                tx.insert_employee(&new_employee("Grace", "grace@example.com", Role::Admin))?;
            for leave_type in [&sick, &casual] {
                let total_days = if leave_type.name == SICK_LEAVE { 7 } else { 30 };
                tx.upsert_allocation(AllocationGrant {
                    key: AllocationKey::new(employee_id, leave_type.leave_type_id, 2026),
                    total_days,
                })?;
            }
            Ok::<_, PersistenceError>((employee_id, admin_id))
        })
        .unwrap();

    Fixture {
        persistence,
        employee_id,
        admin_id,
        sick,
        casual,
    }
}

pub fn new_request(
    employee_id: i64,
    leave_type_id: i64,
    start: Date,
    end: Date,
    created_at: OffsetDateTime,
) -> NewLeaveRequest {
    let dates = LeaveDates::new(start, end).unwrap();
    NewLeaveRequest {
        employee_id,
        leave_type_id,
        dates,
        days: dates.day_count(),
        reason: String::from("Visiting family out of town"),
        status: LeaveStatus::Pending,
        created_at,
    }
}

pub fn insert(persistence: &mut Persistence, request: &NewLeaveRequest) -> i64 {
    persistence
        .transaction(|tx| tx.insert_request(request))
        .unwrap()
}

pub fn upsert(persistence: &mut Persistence, grant: AllocationGrant) -> UpsertOutcome {
    persistence
        .transaction(|tx| tx.upsert_allocation(grant))
        .unwrap()
}
