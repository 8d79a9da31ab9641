// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// A request to submit leave, expressed as data only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitLeave {
    /// The requested leave type.
    pub leave_type_id: i64,
    /// First day of leave.
    pub start_date: Date,
    /// Last day of leave (inclusive).
    pub end_date: Date,
    /// The employee's stated reason.
    pub reason: String,
}

/// An admin decision on a pending request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Review {
    /// Approve, with an optional comment.
    Approve {
        /// Optional admin comment.
        admin_comment: Option<String>,
    },
    /// Reject, with a mandatory comment.
    Reject {
        /// The reason for rejection.
        admin_comment: String,
    },
}

impl Review {
    /// The action name used in logs and authorization errors.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Approve { .. } => "approve_leave_request",
            Self::Reject { .. } => "reject_leave_request",
        }
    }
}
