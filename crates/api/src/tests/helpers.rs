// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use leaves::LedgerConfig;
use leaves_domain::{AllocationYearPolicy, Role, SICK_LEAVE};
use leaves_persistence::{NewEmployee, Persistence, PersistenceError};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

use crate::{
    AuthenticatedActor, LeaveRequestInfo, RegisterEmployeeRequest, ReviewLeaveRequest,
    SubmitLeaveRequest, approve_leave_request, register_employee, seed_reference_data,
    submit_leave_request,
};

pub fn today() -> Date {
    date!(2026 - 03 - 02)
}

pub fn now() -> OffsetDateTime {
    datetime!(2026-03-02 09:30 UTC)
}

/// A seeded store with one admin and one registered employee holding the
/// standard 2026 quotas.
pub struct TestContext {
    pub persistence: Persistence,
    pub config: LedgerConfig,
    pub admin: AuthenticatedActor,
    pub employee: AuthenticatedActor,
    pub sick_id: i64,
    pub casual_id: i64,
}

impl TestContext {
    pub fn with_policy(policy: AllocationYearPolicy) -> Self {
        let mut context = Self::setup();
        context.config = LedgerConfig::new(policy);
        context
    }

    pub fn setup() -> Self {
        let mut persistence = Persistence::new_in_memory().unwrap();
        seed_reference_data(&mut persistence).unwrap();

        let admin_id: i64 = persistence
            .transaction(|tx| -> Result<i64, PersistenceError> {
                tx.insert_employee(&NewEmployee {
                    name: String::from("Grace Hopper"),
                    email: String::from("grace@example.com"),
                    department: Some(String::from("Operations")),
                    join_date: date!(2020 - 01 - 06),
                    role: Role::Admin,
                })
            })
            .unwrap();
        let admin = AuthenticatedActor::new(admin_id, Role::Admin);

        let registered = register_employee(
            &mut persistence,
            &admin,
            registration("Ada Lovelace", "ada@example.com"),
            today(),
        )
        .unwrap();
        let employee = AuthenticatedActor::new(registered.employee_id, Role::Employee);

        let leave_types = persistence.list_leave_types().unwrap();
        let sick_id = leave_types
            .iter()
            .find(|t| t.name == SICK_LEAVE)
            .unwrap()
            .leave_type_id;
        let casual_id = leave_types
            .iter()
            .find(|t| t.name != SICK_LEAVE)
            .unwrap()
            .leave_type_id;

        Self {
            persistence,
            config: LedgerConfig::default(),
            admin,
            employee,
            sick_id,
            casual_id,
        }
    }

    /// Registers another employee and returns them as an actor.
    pub fn register(&mut self, name: &str, email: &str) -> AuthenticatedActor {
        let response =
            register_employee(&mut self.persistence, &self.admin, registration(name, email), today())
                .unwrap();
        AuthenticatedActor::new(response.employee_id, Role::Employee)
    }

    pub fn submit(
        &mut self,
        actor: AuthenticatedActor,
        leave_type_id: i64,
        start: &str,
        end: &str,
    ) -> Result<LeaveRequestInfo, crate::ApiError> {
        submit_leave_request(
            &mut self.persistence,
            &self.config,
            &actor,
            submission(leave_type_id, start, end),
            now(),
        )
        .map(|response| response.request)
    }

    pub fn approve(&mut self, request_id: i64) -> Result<LeaveRequestInfo, crate::ApiError> {
        approve_leave_request(
            &mut self.persistence,
            &self.config,
            &self.admin,
            request_id,
            ReviewLeaveRequest::default(),
            now(),
        )
        .map(|response| response.request)
    }
}

pub fn registration(name: &str, email: &str) -> RegisterEmployeeRequest {
    RegisterEmployeeRequest {
        name: name.to_string(),
        email: email.to_string(),
        department: Some(String::from("Engineering")),
        join_date: Some(String::from("2024-01-15")),
    }
}

pub fn submission(leave_type_id: i64, start: &str, end: &str) -> SubmitLeaveRequest {
    SubmitLeaveRequest {
        leave_type_id,
        start_date: start.to_string(),
        end_date: end.to_string(),
        reason: String::from("Family visit out of town"),
    }
}
