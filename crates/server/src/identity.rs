// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity extraction.
//!
//! Authentication happens upstream. The authenticating proxy forwards the
//! caller as two headers, which this extractor turns into an
//! `AuthenticatedActor`:
//!
//! - `x-employee-id`: the employee's numeric ID
//! - `x-employee-role`: `employee` or `admin`

use std::str::FromStr;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use leaves_api::{AuthenticatedActor, Role};
use tracing::{debug, warn};

use crate::ErrorResponse;

/// Header carrying the caller's employee ID.
pub const EMPLOYEE_ID_HEADER: &str = "x-employee-id";
/// Header carrying the caller's role.
pub const EMPLOYEE_ROLE_HEADER: &str = "x-employee-role";

/// Extractor for the calling employee.
///
/// ```ignore
/// async fn my_handler(
///     Caller(actor): Caller,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: AuthenticatedActor
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 if either header is missing or malformed.
pub struct Caller(pub AuthenticatedActor);

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = IdentityError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let employee_id: i64 = header_value(parts, EMPLOYEE_ID_HEADER)?
            .parse()
            .map_err(|_| {
                warn!("Employee ID header is not a number");
                IdentityError::Invalid(EMPLOYEE_ID_HEADER)
            })?;

        let role: Role = Role::from_str(header_value(parts, EMPLOYEE_ROLE_HEADER)?).map_err(|_| {
            warn!(employee_id, "Employee role header is not a known role");
            IdentityError::Invalid(EMPLOYEE_ROLE_HEADER)
        })?;

        debug!(employee_id, role = %role, "Caller identified");

        Ok(Self(AuthenticatedActor::new(employee_id, role)))
    }
}

fn header_value<'a>(parts: &'a Parts, name: &'static str) -> Result<&'a str, IdentityError> {
    parts
        .headers
        .get(name)
        .ok_or_else(|| {
            debug!(header = name, "Missing identity header");
            IdentityError::Missing(name)
        })?
        .to_str()
        .map_err(|_| IdentityError::Invalid(name))
}

/// Identity extraction errors.
#[derive(Debug)]
pub enum IdentityError {
    /// A required header is missing.
    Missing(&'static str),
    /// A header is present but malformed.
    Invalid(&'static str),
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::Missing(name) => format!("Missing {name} header"),
            Self::Invalid(name) => format!("Invalid {name} header"),
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: true,
                message,
            }),
        )
            .into_response()
    }
}
