// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use leaves::CoreError;
use leaves_domain::DomainError;
use leaves_persistence::PersistenceError;

/// Authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A ledger or lifecycle rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { message, .. } | Self::InvalidInput { message, .. } => {
                write!(f, "{message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    let field: &str = match err {
        DomainError::InvalidDateRange { .. } => "end_date",
        DomainError::StartDateInPast { .. } => "start_date",
        DomainError::InvalidReason(_) => "reason",
        DomainError::InvalidAdminComment(_) | DomainError::MissingRejectionComment => {
            "admin_comment"
        }
        DomainError::InvalidYear(_) => "year",
        DomainError::InvalidName(_) => "name",
        DomainError::InvalidEmail(_) => "email",
        DomainError::InvalidDepartment(_) => "department",
        DomainError::InvalidLeaveStatus(_) => "status",
        DomainError::InvalidRole(_) => "role",
        DomainError::InvalidAllocationYearPolicy(_) => "allocation_year_policy",
        DomainError::InvalidLeavePeriod(_) => "period",
        DomainError::JoinDateInPast { .. } => "join_date",
        DomainError::DateParseError { .. } => "date",
        DomainError::InvalidAllocation { .. } => {
            return ApiError::Internal { message };
        }
    };

    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    let message: String = err.to_string();
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Unauthorized { action } => ApiError::Unauthorized {
            action,
            required_role: String::from("Admin"),
        },
        CoreError::NoAllocation { .. } => ApiError::DomainRuleViolation {
            rule: String::from("allocation_exists"),
            message,
        },
        CoreError::InsufficientBalance { .. } => ApiError::DomainRuleViolation {
            rule: String::from("sufficient_balance"),
            message,
        },
        CoreError::DateConflict { .. } => ApiError::DomainRuleViolation {
            rule: String::from("no_date_conflict"),
            message,
        },
        CoreError::InvalidState { .. } => ApiError::DomainRuleViolation {
            rule: String::from("request_pending"),
            message,
        },
        CoreError::NotFoundOrNotDeletable { .. } | CoreError::RequestNotFound(_) => {
            ApiError::ResourceNotFound {
                resource_type: String::from("Leave request"),
                message,
            }
        }
        CoreError::LeaveTypeNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Leave type"),
            message,
        },
        CoreError::MissingLeaveType(_) => ApiError::DomainRuleViolation {
            rule: String::from("reference_leave_types"),
            message,
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Guard failures and duplicates are reported as rule violations; anything
/// else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(detail) => ApiError::DomainRuleViolation {
            rule: String::from("unique_email"),
            message: format!("An employee with this email already exists ({detail})"),
        },
        PersistenceError::ConditionalUpdateFailed(detail) => ApiError::DomainRuleViolation {
            rule: String::from("concurrent_update"),
            message: detail,
        },
        PersistenceError::NotFound(detail) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: detail,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
