//! Stock level classification.
//!
//! Inventory alerts fire when a product's on-hand quantity crosses one of two
//! thresholds. Each non-healthy level maps onto the notification tag raised
//! for it.

use serde::{Deserialize, Serialize};

use super::notification::NotificationType;

/// Quantity thresholds for stock alerts. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockThresholds {
    /// At or below this quantity a product is running low.
    pub low: u32,
    /// At or below this quantity a product is critical.
    pub critical: u32,
}

impl Default for StockThresholds {
    fn default() -> Self {
        Self {
            low: 10,
            critical: 5,
        }
    }
}

impl StockThresholds {
    /// Classify an on-hand quantity.
    #[must_use]
    pub const fn classify(&self, quantity: u32) -> StockStatus {
        if quantity == 0 {
            StockStatus::OutOfStock
        } else if quantity <= self.critical {
            StockStatus::Critical
        } else if quantity <= self.low {
            StockStatus::Low
        } else {
            StockStatus::InStock
        }
    }
}

/// Derived stock level of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    Low,
    Critical,
    OutOfStock,
}

impl StockStatus {
    /// The alert raised for this level, if any.
    #[must_use]
    pub const fn notification_type(self) -> Option<NotificationType> {
        match self {
            Self::InStock => None,
            Self::Low => Some(NotificationType::LowStock),
            Self::Critical => Some(NotificationType::CriticalStock),
            Self::OutOfStock => Some(NotificationType::OutOfStock),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::Low => "Low Stock",
            Self::Critical => "Critical",
            Self::OutOfStock => "Out of Stock",
        }
    }
}
