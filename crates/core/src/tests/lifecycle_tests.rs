// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for review and withdrawal transitions.

use crate::{
    Actor, CoreError, Debit, Review, apply_review, apply_submission, apply_withdrawal,
    validate_submission,
};
use leaves_domain::{AllocationKey, DomainError, LeaveRequest, LeaveStatus, calculate_leave_balance};
use time::macros::date;

use super::helpers::{
    ADMIN_ID, EMPLOYEE_ID, SICK_ID, admin_actor, create_allocation, create_request,
    employee_actor, now, persist, sick_context, submit_command, today,
};

fn pending_sick_request() -> LeaveRequest {
    create_request(
        3,
        SICK_ID,
        date!(2026 - 03 - 10),
        date!(2026 - 03 - 12),
        LeaveStatus::Pending,
    )
}

fn approve(comment: Option<&str>) -> Review {
    Review::Approve {
        admin_comment: comment.map(str::to_string),
    }
}

fn reject(comment: &str) -> Review {
    Review::Reject {
        admin_comment: comment.to_string(),
    }
}

// ============================================================================
// Approval
// ============================================================================

#[test]
fn test_approve_debits_allocation_and_records_approver() {
    let allocation = create_allocation(SICK_ID, 7, 7);

    let decision = apply_review(
        &admin_actor(),
        &pending_sick_request(),
        Some(&allocation),
        "Sick",
        2026,
        approve(Some("Get well soon")),
        now(),
    )
    .unwrap();

    assert_eq!(decision.status, LeaveStatus::Approved);
    assert_eq!(decision.approved_by, Some(ADMIN_ID));
    assert_eq!(decision.approved_at, Some(now()));
    assert_eq!(decision.admin_comment.as_deref(), Some("Get well soon"));
    assert_eq!(
        decision.debit,
        Some(Debit {
            key: AllocationKey::new(EMPLOYEE_ID, SICK_ID, 2026),
            days: 3,
        })
    );
}

#[test]
fn test_approve_blank_comment_is_stored_as_none() {
    let allocation = create_allocation(SICK_ID, 7, 7);

    let decision = apply_review(
        &admin_actor(),
        &pending_sick_request(),
        Some(&allocation),
        "Sick",
        2026,
        approve(Some("   ")),
        now(),
    )
    .unwrap();

    assert_eq!(decision.admin_comment, None);
}

#[test]
fn test_approve_requires_admin() {
    let allocation = create_allocation(SICK_ID, 7, 7);

    let result = apply_review(
        &employee_actor(),
        &pending_sick_request(),
        Some(&allocation),
        "Sick",
        2026,
        approve(None),
        now(),
    );

    assert!(matches!(result, Err(CoreError::Unauthorized { .. })));
}

#[test]
fn test_approve_non_pending_request_fails_with_invalid_state() {
    let allocation = create_allocation(SICK_ID, 7, 7);

    for status in [LeaveStatus::Approved, LeaveStatus::Rejected] {
        let mut request = pending_sick_request();
        request.status = status;

        let result = apply_review(
            &admin_actor(),
            &request,
            Some(&allocation),
            "Sick",
            2026,
            approve(None),
            now(),
        );

        assert_eq!(
            result.unwrap_err(),
            CoreError::InvalidState {
                request_id: 3,
                status,
            }
        );
    }
}

#[test]
fn test_approve_without_allocation_fails() {
    let result = apply_review(
        &admin_actor(),
        &pending_sick_request(),
        None,
        "Sick",
        2026,
        approve(None),
        now(),
    );

    assert!(matches!(result, Err(CoreError::NoAllocation { year: 2026, .. })));
}

#[test]
fn test_approve_with_insufficient_remaining_fails() {
    let allocation = create_allocation(SICK_ID, 7, 2);

    let result = apply_review(
        &admin_actor(),
        &pending_sick_request(),
        Some(&allocation),
        "Sick",
        2026,
        approve(None),
        now(),
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::InsufficientBalance {
            effective_remaining: 2,
            requested_days: 3,
            leave_type_name: String::from("Sick"),
        }
    );
}

// ============================================================================
// Rejection
// ============================================================================

#[test]
fn test_reject_sets_comment_without_debit() {
    let decision = apply_review(
        &admin_actor(),
        &pending_sick_request(),
        None,
        "Sick",
        2026,
        reject("Team is short-staffed that week"),
        now(),
    )
    .unwrap();

    assert_eq!(decision.status, LeaveStatus::Rejected);
    assert_eq!(
        decision.admin_comment.as_deref(),
        Some("Team is short-staffed that week")
    );
    assert_eq!(decision.debit, None);
    assert_eq!(decision.approved_by, None);
}

#[test]
fn test_reject_requires_comment() {
    let result = apply_review(
        &admin_actor(),
        &pending_sick_request(),
        None,
        "Sick",
        2026,
        reject("   "),
        now(),
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::MissingRejectionComment)
    );
}

#[test]
fn test_reject_non_pending_request_fails_with_invalid_state() {
    let mut request = pending_sick_request();
    request.status = LeaveStatus::Approved;

    let result = apply_review(
        &admin_actor(),
        &request,
        None,
        "Sick",
        2026,
        reject("Changed my mind"),
        now(),
    );

    assert!(matches!(result, Err(CoreError::InvalidState { .. })));
}

// ============================================================================
// Withdrawal
// ============================================================================

#[test]
fn test_owner_can_withdraw_pending_request() {
    assert!(apply_withdrawal(&employee_actor(), 3, Some(&pending_sick_request())).is_ok());
}

#[test]
fn test_withdraw_reviewed_request_fails() {
    let mut request = pending_sick_request();
    request.status = LeaveStatus::Approved;

    let result = apply_withdrawal(&employee_actor(), 3, Some(&request));

    assert_eq!(
        result.unwrap_err(),
        CoreError::NotFoundOrNotDeletable { request_id: 3 }
    );
}

#[test]
fn test_withdraw_other_employees_request_fails() {
    let result = apply_withdrawal(&Actor::employee(99), 3, Some(&pending_sick_request()));

    assert!(matches!(
        result,
        Err(CoreError::NotFoundOrNotDeletable { request_id: 3 })
    ));
}

#[test]
fn test_withdraw_missing_request_fails() {
    let result = apply_withdrawal(&employee_actor(), 42, None);

    assert!(matches!(
        result,
        Err(CoreError::NotFoundOrNotDeletable { request_id: 42 })
    ));
}

// ============================================================================
// End-to-end balance scenario
// ============================================================================

#[test]
fn test_sick_leave_scenario() {
    let actor = employee_actor();
    let mut allocation = create_allocation(SICK_ID, 7, 7);
    let mut requests: Vec<LeaveRequest> = Vec::new();

    // 3 days: accepted, nothing debited yet.
    let first = validate_submission(
        &submit_command(SICK_ID, date!(2026 - 03 - 10), date!(2026 - 03 - 12)),
        today(),
    )
    .unwrap();
    let context = sick_context(Some(allocation.clone()), requests.clone());
    requests.push(persist(
        apply_submission(&actor, first, &context, 2026, now()).unwrap(),
        1,
    ));
    let balance = calculate_leave_balance(&allocation, "Sick", &requests);
    assert_eq!(balance.remaining, 7);
    assert_eq!(balance.total_pending, 3);

    // 5 more days: only 4 effectively left.
    let second = validate_submission(
        &submit_command(SICK_ID, date!(2026 - 04 - 06), date!(2026 - 04 - 10)),
        today(),
    )
    .unwrap();
    let context = sick_context(Some(allocation.clone()), requests.clone());
    assert!(matches!(
        apply_submission(&actor, second, &context, 2026, now()),
        Err(CoreError::InsufficientBalance {
            effective_remaining: 4,
            requested_days: 5,
            ..
        })
    ));

    // Approve the first request.
    let decision = apply_review(
        &admin_actor(),
        &requests[0],
        Some(&allocation),
        "Sick",
        2026,
        approve(None),
        now(),
    )
    .unwrap();
    let debit = decision.debit.unwrap();
    allocation.remaining -= debit.days;
    requests[0].status = decision.status;
    assert_eq!(allocation.remaining, 4);
    assert!(allocation.validate().is_ok());

    // 4 days now fit exactly.
    let third = validate_submission(
        &submit_command(SICK_ID, date!(2026 - 04 - 06), date!(2026 - 04 - 09)),
        today(),
    )
    .unwrap();
    let context = sick_context(Some(allocation.clone()), requests.clone());
    assert!(apply_submission(&actor, third, &context, 2026, now()).is_ok());
}
