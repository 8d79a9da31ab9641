// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::date_range::LeaveDates;
use crate::error::DomainError;
use time::Date;

/// Minimum length of a leave reason, in characters.
pub const MIN_REASON_LENGTH: usize = 10;

/// Maximum length of a leave reason, in characters.
pub const MAX_REASON_LENGTH: usize = 500;

/// Maximum length of an admin comment, in characters.
pub const MAX_COMMENT_LENGTH: usize = 500;

/// Maximum length of an employee name, in characters.
pub const MAX_NAME_LENGTH: usize = 255;

/// Validates a leave reason and returns it trimmed.
///
/// # Errors
///
/// Returns an error if the trimmed reason is shorter than
/// `MIN_REASON_LENGTH` or longer than `MAX_REASON_LENGTH` characters.
pub fn validate_reason(reason: &str) -> Result<String, DomainError> {
    let trimmed: &str = reason.trim();
    let length: usize = trimmed.chars().count();

    if length == 0 {
        return Err(DomainError::InvalidReason(String::from(
            "Please provide a reason for your leave request",
        )));
    }
    if length < MIN_REASON_LENGTH {
        return Err(DomainError::InvalidReason(format!(
            "Reason must be at least {MIN_REASON_LENGTH} characters long"
        )));
    }
    if length > MAX_REASON_LENGTH {
        return Err(DomainError::InvalidReason(format!(
            "Reason cannot exceed {MAX_REASON_LENGTH} characters"
        )));
    }

    Ok(trimmed.to_string())
}

/// Validates an optional approval comment.
///
/// Blank comments are normalized to `None`.
///
/// # Errors
///
/// Returns an error if the comment exceeds `MAX_COMMENT_LENGTH` characters.
pub fn validate_admin_comment(comment: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(trimmed) = comment.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };

    if trimmed.chars().count() > MAX_COMMENT_LENGTH {
        return Err(DomainError::InvalidAdminComment(format!(
            "Comment cannot exceed {MAX_COMMENT_LENGTH} characters"
        )));
    }

    Ok(Some(trimmed.to_string()))
}

/// Validates a rejection comment, which is mandatory.
///
/// # Errors
///
/// Returns an error if the comment is blank or too long.
pub fn validate_rejection_comment(comment: &str) -> Result<String, DomainError> {
    validate_admin_comment(Some(comment))?.ok_or(DomainError::MissingRejectionComment)
}

/// Validates that a leave does not start in the past.
///
/// # Errors
///
/// Returns `DomainError::StartDateInPast` if the range starts before `today`.
pub fn validate_start_date(dates: &LeaveDates, today: Date) -> Result<(), DomainError> {
    if dates.start_date() < today {
        return Err(DomainError::StartDateInPast {
            start_date: dates.start_date(),
            today,
        });
    }
    Ok(())
}

/// Validates a join date edit.
///
/// An unchanged join date is always accepted; a new one may not lie
/// before `today`.
///
/// # Errors
///
/// Returns `DomainError::JoinDateInPast` if a changed join date is in the
/// past.
pub fn validate_join_date_change(
    current: Date,
    requested: Date,
    today: Date,
) -> Result<(), DomainError> {
    if requested != current && requested < today {
        return Err(DomainError::JoinDateInPast {
            join_date: requested,
            today,
        });
    }
    Ok(())
}

/// Validates that an allocation year is a reasonable calendar year.
///
/// # Errors
///
/// Returns an error if the year is outside 2000-2200.
pub fn validate_year(year: i32) -> Result<(), DomainError> {
    if !(2000..=2200).contains(&year) {
        return Err(DomainError::InvalidYear(format!(
            "Year must be between 2000 and 2200, got {year}"
        )));
    }
    Ok(())
}

/// Validates an employee name and returns it trimmed.
///
/// # Errors
///
/// Returns an error if the name is blank or longer than `MAX_NAME_LENGTH`.
pub fn validate_employee_name(name: &str) -> Result<String, DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidName(format!(
            "Name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validates an email address and returns it normalized to lowercase.
///
/// Only the shape `local@domain` is checked.
///
/// # Errors
///
/// Returns an error if the email is blank or not of the form `local@domain`.
pub fn validate_email(email: &str) -> Result<String, DomainError> {
    let normalized: String = email.trim().to_lowercase();
    let Some((local, domain)) = normalized.split_once('@') else {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' is not a valid email address"
        )));
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(normalized)
}

/// Validates an optional department name.
///
/// Blank departments are normalized to `None`.
///
/// # Errors
///
/// Returns an error if the department exceeds `MAX_NAME_LENGTH` characters.
pub fn validate_department(department: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(trimmed) = department.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(None);
    };
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidDepartment(format!(
            "Department cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}
