// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fixed annual quotas granted by the yearly allocation.

/// Name of the sick leave type.
pub const SICK_LEAVE: &str = "Sick";

/// Name of the casual leave type.
pub const CASUAL_LEAVE: &str = "Casual";

/// Days granted per year for one leave type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveQuota {
    /// The leave type name the quota applies to.
    pub leave_type_name: &'static str,
    /// Days granted per calendar year.
    pub annual_days: i32,
}

/// The quotas every employee receives each year.
pub const STANDARD_QUOTAS: [LeaveQuota; 2] = [
    LeaveQuota {
        leave_type_name: SICK_LEAVE,
        annual_days: 7,
    },
    LeaveQuota {
        leave_type_name: CASUAL_LEAVE,
        annual_days: 30,
    },
];
