// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `employees` — Employee registration
//! - `leave_types` — Reference data seeding
//! - `allocations` — Ledger upserts and guarded debits
//! - `requests` — Request insertion, guarded status transitions, soft delete
//!
//! Guarded updates report a matched-nothing outcome as
//! `PersistenceError::ConditionalUpdateFailed` so the enclosing transaction
//! rolls back.

pub mod allocations;
pub mod employees;
pub mod leave_types;
pub mod requests;
