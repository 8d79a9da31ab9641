// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authenticated actors and role checks.
//!
//! Identity is established upstream. The API receives the caller as an
//! `AuthenticatedActor` and only decides what that caller may do.

use crate::error::AuthError;
use leaves::Actor;
use leaves_domain::Role;

/// An authenticated caller with an associated role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The employee the caller is authenticated as.
    pub employee_id: i64,
    /// The role assigned to this caller.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `employee_id` - The employee the caller is authenticated as
    /// * `role` - The role assigned to this caller
    #[must_use]
    pub const fn new(employee_id: i64, role: Role) -> Self {
        Self { employee_id, role }
    }

    /// Converts this authenticated actor into the actor the core engine
    /// decides against.
    #[must_use]
    pub const fn to_core_actor(&self) -> Actor {
        Actor::new(self.employee_id, self.role)
    }
}

/// Authorization service for role-gated actions.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Employee => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor is authorized to register an employee.
    ///
    /// Only Admin actors may register employees.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_register_employee(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "register_employee")
    }

    /// Checks if an actor may list, edit or delete employees.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_employees(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_employees")
    }

    /// Checks if an actor is authorized to run the yearly allocation.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_run_yearly_allocation(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "run_yearly_allocation")
    }

    /// Checks if an actor may view data belonging to `employee_id`.
    ///
    /// Employees may view their own data; admins may view anyone's.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither the owner nor an admin.
    pub fn authorize_view_employee(
        actor: &AuthenticatedActor,
        employee_id: i64,
    ) -> Result<(), AuthError> {
        if actor.to_core_actor().can_view(employee_id) {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("view_other_employee"),
            required_role: String::from("Admin"),
        })
    }
}
