//! HTTP middleware for admin.
//!
//! Every back-office route sits behind a staff session; the extractors in
//! [`auth`] read it.

pub mod auth;
pub mod session;

pub use auth::{RequireNotificationAccess, RequireStaff, StaffAuthRejection, set_current_staff};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
