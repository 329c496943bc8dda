//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use vapour_lounge_core::UserId;

/// Session-stored user identity.
///
/// Written by the auth callback once the external provider has verified the
/// user. Minimal data only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Account ID issued by the auth provider.
    pub id: UserId,
    /// Email, when the provider shares it.
    pub email: Option<String>,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current signed-in user.
    pub const CURRENT_USER: &str = "current_user";
}
