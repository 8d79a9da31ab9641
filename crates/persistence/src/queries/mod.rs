// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `employees` — Employee lookups and counts
//! - `leave_types` — Reference data lookups
//! - `allocations` — Allocation ledger reads
//! - `requests` — Leave request reads (soft-deleted rows excluded)
//! - `dashboard` — Count and aggregation queries

pub mod allocations;
pub mod dashboard;
pub mod employees;
pub mod leave_types;
pub mod requests;
