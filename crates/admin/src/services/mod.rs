//! Business logic services for admin.

pub mod alerts;

pub use alerts::AlertService;
