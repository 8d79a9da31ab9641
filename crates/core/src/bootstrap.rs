// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Yearly allocation planning.
//!
//! The bootstrapper grants the standard quotas to every employee holding
//! the `employee` role. Planning is pure; the caller upserts the grants
//! inside a single transaction.

use crate::error::CoreError;
use crate::state::{AllocationGrant, YearlyAllocationPlan};
use leaves_domain::{
    AllocationKey, Employee, LeaveType, Role, STANDARD_QUOTAS, validate_year,
};

/// Resolves every standard quota to its leave type id.
///
/// # Errors
///
/// Returns `CoreError::MissingLeaveType` naming the first quota whose
/// leave type does not exist.
pub fn resolve_standard_quotas(leave_types: &[LeaveType]) -> Result<Vec<(i64, i32)>, CoreError> {
    STANDARD_QUOTAS
        .iter()
        .map(|quota| {
            leave_types
                .iter()
                .find(|leave_type| leave_type.name == quota.leave_type_name)
                .map(|leave_type| (leave_type.leave_type_id, quota.annual_days))
                .ok_or_else(|| CoreError::MissingLeaveType(quota.leave_type_name.to_string()))
        })
        .collect()
}

/// Plans the standard allocations for a single employee.
///
/// # Errors
///
/// Returns an error if the year is out of range or a standard leave type
/// is missing.
pub fn plan_employee_allocations(
    employee_id: i64,
    year: i32,
    leave_types: &[LeaveType],
) -> Result<Vec<AllocationGrant>, CoreError> {
    validate_year(year)?;
    let quotas: Vec<(i64, i32)> = resolve_standard_quotas(leave_types)?;

    Ok(quotas
        .into_iter()
        .map(|(leave_type_id, total_days)| AllocationGrant {
            key: AllocationKey::new(employee_id, leave_type_id, year),
            total_days,
        })
        .collect())
}

/// Plans the yearly allocation run.
///
/// Admins are skipped. With no employees the plan is empty.
///
/// # Arguments
///
/// * `year` - The year to allocate
/// * `employees` - Every known employee
/// * `leave_types` - Every known leave type
///
/// # Returns
///
/// The grants, grouped per employee in input order.
///
/// # Errors
///
/// Returns an error if the year is out of range or the `Sick` or `Casual`
/// leave type is missing. Nothing is planned in that case.
pub fn plan_yearly_allocations(
    year: i32,
    employees: &[Employee],
    leave_types: &[LeaveType],
) -> Result<YearlyAllocationPlan, CoreError> {
    validate_year(year)?;
    let quotas: Vec<(i64, i32)> = resolve_standard_quotas(leave_types)?;

    let eligible: Vec<&Employee> = employees
        .iter()
        .filter(|employee| employee.role == Role::Employee)
        .collect();

    let grants: Vec<AllocationGrant> = eligible
        .iter()
        .flat_map(|employee| {
            quotas
                .iter()
                .map(move |&(leave_type_id, total_days)| AllocationGrant {
                    key: AllocationKey::new(employee.employee_id, leave_type_id, year),
                    total_days,
                })
        })
        .collect();

    Ok(YearlyAllocationPlan {
        year,
        grants,
        employees_processed: eligible.len(),
    })
}
