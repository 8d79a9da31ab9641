// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for submitting leave requests.

use leaves_domain::AllocationYearPolicy;

use super::helpers::{TestContext, now, submission};
use crate::{ApiError, get_allocation_summary, submit_leave_request};

fn assert_rule(result: Result<impl std::fmt::Debug, ApiError>, expected_rule: &str) {
    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, expected_rule),
        other => panic!("expected rule violation '{expected_rule}', got {other:?}"),
    }
}

fn assert_invalid_field(result: Result<impl std::fmt::Debug, ApiError>, expected_field: &str) {
    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, expected_field),
        other => panic!("expected invalid '{expected_field}', got {other:?}"),
    }
}

#[test]
fn test_submit_creates_pending_request() {
    let mut ctx = TestContext::setup();
    let employee = ctx.employee;
    let sick_id = ctx.sick_id;

    let request = ctx
        .submit(employee, sick_id, "2026-03-10", "2026-03-12")
        .unwrap();

    assert_eq!(request.status, "pending");
    assert_eq!(request.days, 3);
    assert_eq!(request.employee_id, employee.employee_id);
    assert_eq!(request.start_date, "2026-03-10");
    assert_eq!(request.end_date, "2026-03-12");
    assert_eq!(request.created_at, "2026-03-02T09:30:00Z");
    assert_eq!(request.approved_by, None);
}

#[test]
fn test_submit_starting_today_is_allowed() {
    let mut ctx = TestContext::setup();
    let employee = ctx.employee;
    let sick_id = ctx.sick_id;

    let request = ctx
        .submit(employee, sick_id, "2026-03-02", "2026-03-02")
        .unwrap();

    assert_eq!(request.days, 1);
}

#[test]
fn test_submit_rejects_bad_input() {
    let mut ctx = TestContext::setup();
    let employee = ctx.employee;
    let sick_id = ctx.sick_id;

    assert_invalid_field(
        ctx.submit(employee, sick_id, "2026-03-01", "2026-03-03"),
        "start_date",
    );
    assert_invalid_field(
        ctx.submit(employee, sick_id, "2026-03-12", "2026-03-10"),
        "end_date",
    );
    assert_invalid_field(
        ctx.submit(employee, sick_id, "2026-13-01", "2026-13-02"),
        "start_date",
    );

    let mut short_reason = submission(sick_id, "2026-03-10", "2026-03-10");
    short_reason.reason = String::from("  short  ");
    assert_invalid_field(
        submit_leave_request(&mut ctx.persistence, &ctx.config, &employee, short_reason, now()),
        "reason",
    );
}

#[test]
fn test_submit_unknown_leave_type_is_not_found() {
    let mut ctx = TestContext::setup();
    let employee = ctx.employee;

    let result = ctx.submit(employee, 999, "2026-03-10", "2026-03-10");

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_overlap_with_pending_request_of_any_type_conflicts() {
    let mut ctx = TestContext::setup();
    let employee = ctx.employee;
    let (sick_id, casual_id) = (ctx.sick_id, ctx.casual_id);

    ctx.submit(employee, sick_id, "2026-03-10", "2026-03-12")
        .unwrap();

    assert_rule(
        ctx.submit(employee, casual_id, "2026-03-12", "2026-03-14"),
        "no_date_conflict",
    );
    assert!(ctx.submit(employee, casual_id, "2026-03-13", "2026-03-14").is_ok());
}

#[test]
fn test_other_employees_do_not_conflict() {
    let mut ctx = TestContext::setup();
    let employee = ctx.employee;
    let sick_id = ctx.sick_id;
    let colleague = ctx.register("Linus Torvalds", "linus@example.com");

    ctx.submit(employee, sick_id, "2026-03-10", "2026-03-12")
        .unwrap();

    assert!(ctx.submit(colleague, sick_id, "2026-03-10", "2026-03-12").is_ok());
}

#[test]
fn test_exact_effective_balance_succeeds_and_one_more_day_fails() {
    let mut ctx = TestContext::setup();
    let employee = ctx.employee;
    let casual_id = ctx.casual_id;

    let full = ctx
        .submit(employee, casual_id, "2026-04-01", "2026-04-30")
        .unwrap();
    assert_eq!(full.days, 30);

    assert_rule(
        ctx.submit(employee, casual_id, "2026-05-04", "2026-05-04"),
        "sufficient_balance",
    );
}

#[test]
fn test_sick_leave_scenario() {
    let mut ctx = TestContext::setup();
    let employee = ctx.employee;
    let sick_id = ctx.sick_id;

    let first = ctx
        .submit(employee, sick_id, "2026-03-10", "2026-03-12")
        .unwrap();

    let summary =
        get_allocation_summary(&mut ctx.persistence, &employee, employee.employee_id, 2026)
            .unwrap();
    let sick = summary
        .balances
        .iter()
        .find(|b| b.leave_type_id == sick_id)
        .unwrap();
    assert_eq!(sick.remaining, 7);
    assert_eq!(sick.total_pending, 3);
    assert_eq!(sick.effective_remaining, 4);

    assert_rule(
        ctx.submit(employee, sick_id, "2026-04-01", "2026-04-05"),
        "sufficient_balance",
    );

    ctx.approve(first.request_id).unwrap();
    let summary =
        get_allocation_summary(&mut ctx.persistence, &employee, employee.employee_id, 2026)
            .unwrap();
    let sick = summary
        .balances
        .iter()
        .find(|b| b.leave_type_id == sick_id)
        .unwrap();
    assert_eq!(sick.remaining, 4);
    assert_eq!(sick.total_pending, 0);
    assert_eq!(sick.total_used, 3);

    assert!(ctx.submit(employee, sick_id, "2026-04-01", "2026-04-04").is_ok());
}

#[test]
fn test_current_year_policy_uses_this_years_allocation() {
    let mut ctx = TestContext::setup();
    let employee = ctx.employee;
    let sick_id = ctx.sick_id;

    let request = ctx
        .submit(employee, sick_id, "2027-01-04", "2027-01-05")
        .unwrap();

    assert_eq!(request.days, 2);
}

#[test]
fn test_request_start_year_policy_requires_that_years_allocation() {
    let mut ctx = TestContext::with_policy(AllocationYearPolicy::RequestStartYear);
    let employee = ctx.employee;
    let sick_id = ctx.sick_id;

    assert_rule(
        ctx.submit(employee, sick_id, "2027-01-04", "2027-01-05"),
        "allocation_exists",
    );
    assert!(ctx.submit(employee, sick_id, "2026-12-28", "2026-12-29").is_ok());
}
