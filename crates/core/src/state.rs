// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leaves_domain::{Allocation, AllocationKey, LeaveDates, LeaveRequest, LeaveStatus, LeaveType};
use time::OffsetDateTime;

/// Everything a submission decision needs, loaded by the caller.
///
/// The caller is expected to load this inside the same transaction that
/// will persist the decision.
#[derive(Debug, Clone)]
pub struct SubmissionContext {
    /// The requested leave type.
    pub leave_type: LeaveType,
    /// The allocation selected by the allocation-year policy, if any.
    pub allocation: Option<Allocation>,
    /// The employee's pending requests, across all leave types.
    pub pending_requests: Vec<LeaveRequest>,
}

/// A submission that passed input validation but has not yet been
/// checked against the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    /// The requested leave type.
    pub leave_type_id: i64,
    /// The inclusive date range.
    pub dates: LeaveDates,
    /// Inclusive day count.
    pub days: i32,
    /// The trimmed reason.
    pub reason: String,
}

/// A new request ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeaveRequest {
    /// The owning employee.
    pub employee_id: i64,
    /// The requested leave type.
    pub leave_type_id: i64,
    /// The inclusive date range.
    pub dates: LeaveDates,
    /// Inclusive day count.
    pub days: i32,
    /// The trimmed reason.
    pub reason: String,
    /// Always `Pending`.
    pub status: LeaveStatus,
    /// Submission timestamp.
    pub created_at: OffsetDateTime,
}

/// A guarded decrement of an allocation's remaining days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debit {
    /// The allocation to debit.
    pub key: AllocationKey,
    /// Days to subtract from `remaining`.
    pub days: i32,
}

/// The outcome of an approve or reject decision.
///
/// The status change and the optional debit must be applied together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDecision {
    /// The reviewed request.
    pub request_id: i64,
    /// The new terminal status.
    pub status: LeaveStatus,
    /// The validated admin comment.
    pub admin_comment: Option<String>,
    /// The approving admin (approvals only).
    pub approved_by: Option<i64>,
    /// The approval timestamp (approvals only).
    pub approved_at: Option<OffsetDateTime>,
    /// The ledger debit (approvals only).
    pub debit: Option<Debit>,
}

/// One allocation the bootstrapper wants to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationGrant {
    /// The allocation key.
    pub key: AllocationKey,
    /// Days to set as both total and remaining.
    pub total_days: i32,
}

/// The allocations a yearly run will upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlyAllocationPlan {
    /// The year allocated.
    pub year: i32,
    /// One grant per eligible employee and standard leave type.
    pub grants: Vec<AllocationGrant>,
    /// Employees holding the `employee` role.
    pub employees_processed: usize,
}

impl YearlyAllocationPlan {
    /// Returns an empty summary carrying this plan's year and employee count.
    #[must_use]
    pub const fn summary(&self) -> BootstrapSummary {
        BootstrapSummary {
            year: self.year,
            created: 0,
            updated: 0,
            employees_processed: self.employees_processed,
        }
    }
}

/// Whether an upsert created a new allocation row or reset an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A row was inserted.
    Created,
    /// An existing row was overwritten.
    Updated,
}

/// Counts produced by a yearly allocation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BootstrapSummary {
    /// The year allocated.
    pub year: i32,
    /// Rows inserted.
    pub created: usize,
    /// Rows reset.
    pub updated: usize,
    /// Employees that received allocations.
    pub employees_processed: usize,
}

impl BootstrapSummary {
    /// Creates an empty summary for `year`.
    #[must_use]
    pub const fn new(year: i32) -> Self {
        Self {
            year,
            created: 0,
            updated: 0,
            employees_processed: 0,
        }
    }

    /// Tallies one upsert outcome.
    pub const fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created => self.created += 1,
            UpsertOutcome::Updated => self.updated += 1,
        }
    }
}
