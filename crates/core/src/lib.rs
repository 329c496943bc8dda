//! 13th Vapour Lounge Core - Shared types library.
//!
//! This crate provides common types used across all Vapour Lounge components:
//! - `storefront` - Customer-facing catalog, cart and guest cart merge
//! - `admin` - Back-office notifications, POS close-out and stock alerts
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types and pure business rules - no I/O, no
//! database access, no HTTP clients.
//!
//! # Modules
//!
//! - [`types`] - IDs, prices, cart lines, notification vocabulary and the
//!   cash/stock thresholds shared by producers and consumers of alerts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
