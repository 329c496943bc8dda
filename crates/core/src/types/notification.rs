//! Admin notification vocabulary.
//!
//! Every admin alert carries one [`NotificationType`] tag. Tags are stored as
//! data in the notifications table, so the string form of each variant is a
//! stable contract: never rename a tag, only add new ones.
//!
//! The list view groups tags into a [`NotificationCategory`] for filtering.
//! Nothing else varies by type at this layer.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an unknown notification tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown notification type: {0}")]
pub struct ParseNotificationTypeError(pub String);

/// Defines `NotificationType` with its tag and category in one table so the
/// three can never drift apart.
macro_rules! notification_types {
    ($($variant:ident => $tag:literal, $category:ident;)+) => {
        /// Closed set of admin notification kinds.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum NotificationType {
            $($variant,)+
        }

        impl NotificationType {
            /// Every notification type, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Stable lowercase snake_case tag.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $tag,)+
                }
            }

            /// The filter group this type belongs to.
            #[must_use]
            pub const fn category(self) -> NotificationCategory {
                match self {
                    $(Self::$variant => NotificationCategory::$category,)+
                }
            }
        }

        impl FromStr for NotificationType {
            type Err = ParseNotificationTypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($tag => Ok(Self::$variant),)+
                    _ => Err(ParseNotificationTypeError(s.to_string())),
                }
            }
        }
    };
}

notification_types! {
    // Orders and POS
    NewOrder => "new_order", Orders;
    OrderStatusChanged => "order_status_changed", Orders;
    OrderCancelled => "order_cancelled", Orders;
    PosTransaction => "pos_transaction", Orders;
    ReturnRequested => "return_requested", Orders;
    PaymentVerification => "payment_verification", Orders;

    // Staff
    StaffCreated => "staff_created", Staff;
    StaffClockIn => "staff_clock_in", Staff;
    StaffClockOut => "staff_clock_out", Staff;
    CashDiscrepancy => "cash_discrepancy", Staff;

    // Inventory thresholds and batches
    LowStock => "low_stock", Inventory;
    CriticalStock => "critical_stock", Inventory;
    OutOfStock => "out_of_stock", Inventory;
    BatchCreated => "batch_created", Inventory;
    BatchDepleted => "batch_depleted", Inventory;
    BatchExpiring => "batch_expiring", Inventory;
    BatchExpired => "batch_expired", Inventory;

    // Catalog
    ProductCreated => "product_created", Catalog;
    ProductUpdated => "product_updated", Catalog;
    ProductDeleted => "product_deleted", Catalog;
    CategoryCreated => "category_created", Catalog;
    CategoryUpdated => "category_updated", Catalog;
    CategoryDeleted => "category_deleted", Catalog;

    // Suppliers
    SupplierCreated => "supplier_created", Suppliers;
    SupplierUpdated => "supplier_updated", Suppliers;
    SupplierDeleted => "supplier_deleted", Suppliers;

    // Purchase orders
    PurchaseOrderCreated => "purchase_order_created", PurchaseOrders;
    PurchaseOrderApproved => "purchase_order_approved", PurchaseOrders;
    PurchaseOrderReceived => "purchase_order_received", PurchaseOrders;
    PurchaseOrderCancelled => "purchase_order_cancelled", PurchaseOrders;
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter groups shown in the admin notification list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Orders,
    Staff,
    Inventory,
    Catalog,
    Suppliers,
    PurchaseOrders,
}

impl NotificationCategory {
    pub const ALL: &'static [Self] = &[
        Self::Orders,
        Self::Staff,
        Self::Inventory,
        Self::Catalog,
        Self::Suppliers,
        Self::PurchaseOrders,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Staff => "staff",
            Self::Inventory => "inventory",
            Self::Catalog => "catalog",
            Self::Suppliers => "suppliers",
            Self::PurchaseOrders => "purchase_orders",
        }
    }

    /// Human-readable filter label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Orders => "Orders & POS",
            Self::Staff => "Staff",
            Self::Inventory => "Inventory",
            Self::Catalog => "Catalog",
            Self::Suppliers => "Suppliers",
            Self::PurchaseOrders => "Purchase Orders",
        }
    }

    /// Notification types in this category.
    #[must_use]
    pub fn types(self) -> Vec<NotificationType> {
        NotificationType::ALL
            .iter()
            .copied()
            .filter(|t| t.category() == self)
            .collect()
    }
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationCategory {
    type Err = ParseNotificationTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseNotificationTypeError(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_tags_roundtrip_through_from_str() {
        for ty in NotificationType::ALL {
            assert_eq!(ty.as_str().parse::<NotificationType>().unwrap(), *ty);
        }
    }

    #[test]
    fn test_tags_are_unique_snake_case() {
        let mut seen = HashSet::new();
        for ty in NotificationType::ALL {
            let tag = ty.as_str();
            assert!(seen.insert(tag), "duplicate tag {tag}");
            assert!(
                tag.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "tag {tag} is not snake_case"
            );
        }
    }

    #[test]
    fn test_serde_matches_tag() {
        for ty in NotificationType::ALL {
            let json = serde_json::to_string(ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
        }
    }

    #[test]
    fn test_persisted_tags_are_stable() {
        assert_eq!(NotificationType::NewOrder.as_str(), "new_order");
        assert_eq!(NotificationType::LowStock.as_str(), "low_stock");
        assert_eq!(NotificationType::StaffCreated.as_str(), "staff_created");
        assert_eq!(NotificationType::CashDiscrepancy.as_str(), "cash_discrepancy");
        assert_eq!(
            NotificationType::PurchaseOrderReceived.as_str(),
            "purchase_order_received"
        );
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let err = "price_drop".parse::<NotificationType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown notification type: price_drop");
    }

    #[test]
    fn test_every_type_in_exactly_one_category() {
        let total: usize = NotificationCategory::ALL
            .iter()
            .map(|c| c.types().len())
            .sum();
        assert_eq!(total, NotificationType::ALL.len());
    }

    #[test]
    fn test_inventory_category_contains_stock_levels() {
        let inventory = NotificationCategory::Inventory.types();
        assert!(inventory.contains(&NotificationType::LowStock));
        assert!(inventory.contains(&NotificationType::CriticalStock));
        assert!(inventory.contains(&NotificationType::OutOfStock));
        assert!(!inventory.contains(&NotificationType::CashDiscrepancy));
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            "purchase_orders".parse::<NotificationCategory>().unwrap(),
            NotificationCategory::PurchaseOrders
        );
        assert!("everything".parse::<NotificationCategory>().is_err());
    }
}
