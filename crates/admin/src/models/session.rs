//! Session-related types for staff authentication.

use serde::{Deserialize, Serialize};
use vapour_lounge_core::{StaffId, StaffRole};

/// Session-stored staff identity.
///
/// Written by the sign-in flow; minimal data only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentStaff {
    pub id: StaffId,
    /// Display name used in alert messages.
    pub name: String,
    pub role: StaffRole,
}

/// Session keys for staff authentication data.
pub mod keys {
    /// Key for storing the current signed-in staff member.
    pub const CURRENT_STAFF: &str = "current_staff";
}
