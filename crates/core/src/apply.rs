// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::actor::Actor;
use crate::command::{Review, SubmitLeave};
use crate::error::CoreError;
use crate::state::{Debit, NewLeaveRequest, ReviewDecision, SubmissionContext, ValidatedSubmission};
use leaves_domain::{
    Allocation, LeaveDates, LeaveRequest, LeaveStatus, calculate_leave_balance,
    validate_admin_comment, validate_reason, validate_rejection_comment, validate_start_date,
};
use time::{Date, OffsetDateTime};

/// Validates the caller-supplied fields of a submission.
///
/// This does not consult the ledger; run `apply_submission` afterwards with
/// the context loaded for the resolved allocation year.
///
/// # Errors
///
/// Returns an error if:
/// - The reason is blank or outside the allowed length
/// - The end date precedes the start date
/// - The start date is before `today`
pub fn validate_submission(
    command: &SubmitLeave,
    today: Date,
) -> Result<ValidatedSubmission, CoreError> {
    let reason: String = validate_reason(&command.reason)?;
    let dates: LeaveDates = LeaveDates::new(command.start_date, command.end_date)?;
    validate_start_date(&dates, today)?;

    Ok(ValidatedSubmission {
        leave_type_id: command.leave_type_id,
        dates,
        days: dates.day_count(),
        reason,
    })
}

/// Decides whether a validated submission may enter the `Pending` state.
///
/// Checks run in order: date conflict with another pending request of
/// the same employee (any leave type), allocation existence, then the
/// effective balance of the requested leave type.
///
/// # Arguments
///
/// * `actor` - The submitting employee
/// * `submission` - The output of `validate_submission`
/// * `context` - Ledger state for the actor and the resolved year
/// * `year` - The allocation year that was resolved
/// * `now` - The submission timestamp
///
/// # Errors
///
/// Returns `DateConflict`, `NoAllocation` or `InsufficientBalance`.
pub fn apply_submission(
    actor: &Actor,
    submission: ValidatedSubmission,
    context: &SubmissionContext,
    year: i32,
    now: OffsetDateTime,
) -> Result<NewLeaveRequest, CoreError> {
    if let Some(conflict) = context.pending_requests.iter().find(|existing| {
        existing.is_pending()
            && existing.employee_id == actor.employee_id
            && existing.dates.overlaps(&submission.dates)
    }) {
        return Err(CoreError::DateConflict {
            conflicting_request_id: conflict.request_id,
            conflicting_dates: conflict.dates,
        });
    }

    let allocation: &Allocation = context
        .allocation
        .as_ref()
        .filter(|allocation| {
            allocation.employee_id == actor.employee_id
                && allocation.leave_type_id == submission.leave_type_id
                && allocation.year == year
        })
        .ok_or_else(|| CoreError::NoAllocation {
            employee_id: actor.employee_id,
            leave_type_name: context.leave_type.name.clone(),
            year,
        })?;

    let balance = calculate_leave_balance(
        allocation,
        &context.leave_type.name,
        &context.pending_requests,
    );
    if !balance.can_cover(submission.days) {
        return Err(CoreError::InsufficientBalance {
            effective_remaining: balance.effective_remaining,
            requested_days: submission.days,
            leave_type_name: context.leave_type.name.clone(),
        });
    }

    Ok(NewLeaveRequest {
        employee_id: actor.employee_id,
        leave_type_id: submission.leave_type_id,
        dates: submission.dates,
        days: submission.days,
        reason: submission.reason,
        status: LeaveStatus::Pending,
        created_at: now,
    })
}

/// Decides an approve or reject action on a request.
///
/// # Arguments
///
/// * `actor` - The reviewing admin
/// * `request` - The current request snapshot
/// * `allocation` - The allocation selected by the allocation-year policy
///   (only consulted for approvals)
/// * `leave_type_name` - The request's leave type name, for messages
/// * `year` - The allocation year that was resolved
/// * `review` - The decision
/// * `now` - The review timestamp
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The comment is invalid (rejections require one)
/// - The request is not pending
/// - The allocation is missing or cannot cover the request (approvals)
pub fn apply_review(
    actor: &Actor,
    request: &LeaveRequest,
    allocation: Option<&Allocation>,
    leave_type_name: &str,
    year: i32,
    review: Review,
    now: OffsetDateTime,
) -> Result<ReviewDecision, CoreError> {
    actor.require_admin(review.action())?;

    match review {
        Review::Approve { admin_comment } => {
            let admin_comment: Option<String> = validate_admin_comment(admin_comment.as_deref())?;
            ensure_pending(request, LeaveStatus::Approved)?;

            let allocation: &Allocation = allocation.ok_or_else(|| CoreError::NoAllocation {
                employee_id: request.employee_id,
                leave_type_name: leave_type_name.to_string(),
                year,
            })?;
            if !allocation.can_debit(request.days) {
                return Err(CoreError::InsufficientBalance {
                    effective_remaining: allocation.remaining,
                    requested_days: request.days,
                    leave_type_name: leave_type_name.to_string(),
                });
            }

            Ok(ReviewDecision {
                request_id: request.request_id,
                status: LeaveStatus::Approved,
                admin_comment,
                approved_by: Some(actor.employee_id),
                approved_at: Some(now),
                debit: Some(Debit {
                    key: allocation.key(),
                    days: request.days,
                }),
            })
        }
        Review::Reject { admin_comment } => {
            let admin_comment: String = validate_rejection_comment(&admin_comment)?;
            ensure_pending(request, LeaveStatus::Rejected)?;

            Ok(ReviewDecision {
                request_id: request.request_id,
                status: LeaveStatus::Rejected,
                admin_comment: Some(admin_comment),
                approved_by: None,
                approved_at: None,
                debit: None,
            })
        }
    }
}

/// Decides whether the actor may withdraw (soft-delete) a request.
///
/// Only the owner may withdraw, and only while the request is pending.
/// A missing request and a request that may not be withdrawn produce the
/// same error.
///
/// # Errors
///
/// Returns `CoreError::NotFoundOrNotDeletable`.
pub fn apply_withdrawal(
    actor: &Actor,
    request_id: i64,
    request: Option<&LeaveRequest>,
) -> Result<(), CoreError> {
    match request {
        Some(request) if request.employee_id == actor.employee_id && request.is_pending() => Ok(()),
        _ => Err(CoreError::NotFoundOrNotDeletable { request_id }),
    }
}

fn ensure_pending(request: &LeaveRequest, target: LeaveStatus) -> Result<(), CoreError> {
    if request.status.can_transition_to(target) {
        return Ok(());
    }
    Err(CoreError::InvalidState {
        request_id: request.request_id,
        status: request.status,
    })
}
