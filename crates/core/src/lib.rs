// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

//! Leave-balance and request-lifecycle decisions.
//!
//! Every function in this crate is pure: callers load snapshots, ask for a
//! decision, and persist the result. No function here performs I/O.

mod actor;
mod apply;
mod bootstrap;
mod command;
mod config;
mod error;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use actor::Actor;
pub use apply::{apply_review, apply_submission, apply_withdrawal, validate_submission};
pub use bootstrap::{plan_employee_allocations, plan_yearly_allocations, resolve_standard_quotas};
pub use command::{Review, SubmitLeave};
pub use config::LedgerConfig;
pub use error::CoreError;
pub use state::{
    AllocationGrant, BootstrapSummary, Debit, NewLeaveRequest, ReviewDecision, SubmissionContext,
    UpsertOutcome, ValidatedSubmission, YearlyAllocationPlan,
};
