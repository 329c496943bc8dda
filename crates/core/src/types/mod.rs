//! Core types for 13th Vapour Lounge.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod cash;
pub mod id;
pub mod notification;
pub mod price;
pub mod status;
pub mod stock;

pub use cart::{CartItemError, CartLineInput, GuestCartItem, MAX_LINE_QUANTITY, validate_quantity};
pub use cash::{CASH_DISCREPANCY_THRESHOLD, CashDiscrepancy};
pub use id::*;
pub use notification::{NotificationCategory, NotificationType, ParseNotificationTypeError};
pub use price::{CurrencyCode, Price};
pub use status::*;
pub use stock::{StockStatus, StockThresholds};
