// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use leaves_domain::Role;

/// The pre-resolved identity an operation runs on behalf of.
///
/// The identity collaborator authenticates the caller and hands the
/// engine this value; the engine trusts it and never consults roles
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Actor {
    /// The employee the caller is authenticated as.
    pub employee_id: i64,
    /// The caller's role.
    pub role: Role,
}

impl Actor {
    /// Creates a new actor.
    #[must_use]
    pub const fn new(employee_id: i64, role: Role) -> Self {
        Self { employee_id, role }
    }

    /// Creates an actor holding the employee role.
    #[must_use]
    pub const fn employee(employee_id: i64) -> Self {
        Self::new(employee_id, Role::Employee)
    }

    /// Creates an actor holding the admin role.
    #[must_use]
    pub const fn admin(employee_id: i64) -> Self {
        Self::new(employee_id, Role::Admin)
    }

    /// Returns whether the actor may review requests.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Fails unless the actor is an admin.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Unauthorized` naming `action`.
    pub fn require_admin(&self, action: &str) -> Result<(), CoreError> {
        if self.is_admin() {
            return Ok(());
        }
        Err(CoreError::Unauthorized {
            action: action.to_string(),
        })
    }

    /// Returns whether the actor may view data belonging to `employee_id`.
    #[must_use]
    pub const fn can_view(&self, employee_id: i64) -> bool {
        self.is_admin() || self.employee_id == employee_id
    }
}
