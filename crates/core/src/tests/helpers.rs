// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Actor, NewLeaveRequest, SubmissionContext, SubmitLeave};
use leaves_domain::{
    Allocation, Employee, LeaveDates, LeaveRequest, LeaveStatus, LeaveType, Role,
};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

pub const EMPLOYEE_ID: i64 = 10;
pub const ADMIN_ID: i64 = 1;
pub const SICK_ID: i64 = 1;
pub const CASUAL_ID: i64 = 2;

pub fn today() -> Date {
    date!(2026 - 03 - 02)
}

pub fn now() -> OffsetDateTime {
    datetime!(2026-03-02 09:30 UTC)
}

pub fn employee_actor() -> Actor {
    Actor::employee(EMPLOYEE_ID)
}

pub fn admin_actor() -> Actor {
    Actor::admin(ADMIN_ID)
}

pub fn sick_type() -> LeaveType {
    LeaveType {
        leave_type_id: SICK_ID,
        name: String::from("Sick"),
        description: Some(String::from("Sick leave")),
    }
}

pub fn casual_type() -> LeaveType {
    LeaveType {
        leave_type_id: CASUAL_ID,
        name: String::from("Casual"),
        description: Some(String::from("Casual leave")),
    }
}

pub fn create_allocation(leave_type_id: i64, total_allocated: i32, remaining: i32) -> Allocation {
    Allocation {
        allocation_id: leave_type_id,
        employee_id: EMPLOYEE_ID,
        leave_type_id,
        year: 2026,
        total_allocated,
        remaining,
    }
}

pub fn submit_command(leave_type_id: i64, start: Date, end: Date) -> SubmitLeave {
    SubmitLeave {
        leave_type_id,
        start_date: start,
        end_date: end,
        reason: String::from("Doctor's appointment and recovery"),
    }
}

/// Turns an accepted submission into a stored snapshot.
pub fn persist(new_request: NewLeaveRequest, request_id: i64) -> LeaveRequest {
    LeaveRequest {
        request_id,
        employee_id: new_request.employee_id,
        leave_type_id: new_request.leave_type_id,
        dates: new_request.dates,
        days: new_request.days,
        reason: new_request.reason,
        status: new_request.status,
        admin_comment: None,
        approved_by: None,
        approved_at: None,
        created_at: new_request.created_at,
    }
}

pub fn create_request(
    request_id: i64,
    leave_type_id: i64,
    start: Date,
    end: Date,
    status: LeaveStatus,
) -> LeaveRequest {
    let dates: LeaveDates = LeaveDates::new(start, end).unwrap();
    LeaveRequest {
        request_id,
        employee_id: EMPLOYEE_ID,
        leave_type_id,
        dates,
        days: dates.day_count(),
        reason: String::from("Family matters to attend"),
        status,
        admin_comment: None,
        approved_by: None,
        approved_at: None,
        created_at: now(),
    }
}

pub fn sick_context(allocation: Option<Allocation>, pending: Vec<LeaveRequest>) -> SubmissionContext {
    SubmissionContext {
        leave_type: sick_type(),
        allocation,
        pending_requests: pending,
    }
}

pub fn create_employee(employee_id: i64, role: Role) -> Employee {
    Employee {
        employee_id,
        name: format!("Employee {employee_id}"),
        email: format!("employee{employee_id}@example.com"),
        department: None,
        join_date: date!(2024 - 01 - 15),
        role,
    }
}
