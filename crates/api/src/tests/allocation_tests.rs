// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for employee registration and the yearly allocation run.

use leaves_persistence::Persistence;

use super::helpers::{TestContext, registration, today};
use crate::{
    ApiError, RegisterEmployeeRequest, RunAllocationRequest, allocate_year,
    get_allocation_summary, register_employee, run_yearly_allocation,
};

fn quotas(ctx: &mut TestContext, employee_id: i64, year: i32) -> Vec<(String, i32, i32)> {
    let admin = ctx.admin;
    get_allocation_summary(&mut ctx.persistence, &admin, employee_id, year)
        .unwrap()
        .balances
        .into_iter()
        .map(|b| (b.leave_type_name, b.total_allocated, b.remaining))
        .collect()
}

#[test]
fn test_registration_grants_standard_quotas() {
    let mut ctx = TestContext::setup();
    let admin = ctx.admin;

    let response = register_employee(
        &mut ctx.persistence,
        &admin,
        RegisterEmployeeRequest {
            name: String::from("  Linus Torvalds "),
            email: String::from("Linus@Example.COM"),
            department: None,
            join_date: None,
        },
        today(),
    )
    .unwrap();

    assert_eq!(response.name, "Linus Torvalds");
    assert_eq!(response.email, "linus@example.com");
    assert_eq!(response.join_date, "2026-03-02");
    assert_eq!(response.allocation_year, 2026);

    let mut granted = quotas(&mut ctx, response.employee_id, 2026);
    granted.sort();
    assert_eq!(
        granted,
        vec![
            (String::from("Casual"), 30, 30),
            (String::from("Sick"), 7, 7),
        ]
    );
}

#[test]
fn test_registration_rejects_duplicate_email() {
    let mut ctx = TestContext::setup();
    let admin = ctx.admin;

    let result = register_employee(
        &mut ctx.persistence,
        &admin,
        registration("Ada Again", "ADA@example.com"),
        today(),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique_email"
    ));
}

#[test]
fn test_registration_validates_fields() {
    let mut ctx = TestContext::setup();
    let admin = ctx.admin;

    let bad_email = register_employee(
        &mut ctx.persistence,
        &admin,
        registration("Linus Torvalds", "not-an-email"),
        today(),
    );
    let blank_name = register_employee(
        &mut ctx.persistence,
        &admin,
        registration("   ", "linus@example.com"),
        today(),
    );

    assert!(matches!(
        bad_email,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "email"
    ));
    assert!(matches!(
        blank_name,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "name"
    ));
}

#[test]
fn test_yearly_allocation_is_idempotent_and_skips_admins() {
    let mut ctx = TestContext::setup();
    let (admin, employee) = (ctx.admin, ctx.employee);

    let first = run_yearly_allocation(
        &mut ctx.persistence,
        &admin,
        RunAllocationRequest { year: Some(2027) },
        today(),
    )
    .unwrap();
    let before = quotas(&mut ctx, employee.employee_id, 2027);
    let second = run_yearly_allocation(
        &mut ctx.persistence,
        &admin,
        RunAllocationRequest { year: Some(2027) },
        today(),
    )
    .unwrap();
    let after = quotas(&mut ctx, employee.employee_id, 2027);

    assert_eq!((first.created, first.updated, first.employees_processed), (2, 0, 1));
    assert_eq!((second.created, second.updated, second.employees_processed), (0, 2, 1));
    assert_eq!(before, after);
    assert!(quotas(&mut ctx, admin.employee_id, 2027).is_empty());
}

#[test]
fn test_yearly_allocation_resets_remaining_after_approval() {
    let mut ctx = TestContext::setup();
    let (admin, employee, sick_id) = (ctx.admin, ctx.employee, ctx.sick_id);
    let request = ctx
        .submit(employee, sick_id, "2026-03-10", "2026-03-12")
        .unwrap();
    ctx.approve(request.request_id).unwrap();
    assert!(quotas(&mut ctx, employee.employee_id, 2026).contains(&(String::from("Sick"), 7, 4)));

    let summary = run_yearly_allocation(
        &mut ctx.persistence,
        &admin,
        RunAllocationRequest::default(),
        today(),
    )
    .unwrap();

    assert_eq!(summary.year, 2026);
    assert_eq!(summary.updated, 2);
    assert!(quotas(&mut ctx, employee.employee_id, 2026).contains(&(String::from("Sick"), 7, 7)));
}

#[test]
fn test_yearly_allocation_rejects_out_of_range_year() {
    let mut ctx = TestContext::setup();

    let result = allocate_year(&mut ctx.persistence, 1999);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "year"
    ));
}

#[test]
fn test_yearly_allocation_requires_reference_leave_types() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result = allocate_year(&mut persistence, 2026);

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "reference_leave_types"
    ));
}
