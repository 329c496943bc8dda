//! Domain models for the admin back-office.

pub mod inventory;
pub mod notification;
pub mod register;
pub mod session;

pub use inventory::{StockCheckInput, StockCheckResult};
pub use notification::{NewNotification, Notification, NotificationFilter};
pub use register::{CloseRegisterInput, RegisterClosing};
pub use session::{CurrentStaff, keys as session_keys};
