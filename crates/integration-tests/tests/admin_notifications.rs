//! Alerting rules as the back-office sees them: the notification
//! vocabulary, the cash discrepancy threshold and stock levels.

use std::collections::HashSet;

use chrono::Utc;
use rust_decimal::Decimal;
use vapour_lounge_admin::models::{CloseRegisterInput, RegisterClosing, StockCheckInput};
use vapour_lounge_admin::services::alerts::{cash_discrepancy_alert, stock_alert};
use vapour_lounge_core::{
    CASH_DISCREPANCY_THRESHOLD, CashDiscrepancy, NotificationCategory, NotificationType,
    ProductId, RegisterClosingId, StaffId, StockStatus, StockThresholds,
};

fn dec(s: &str) -> Decimal {
    s.parse().expect("decimal literal")
}

fn closing(expected: &str, counted: &str) -> RegisterClosing {
    let input = CloseRegisterInput {
        expected_cash: dec(expected),
        counted_cash: dec(counted),
        notes: Some("end of shift".to_string()),
    };
    let discrepancy = input.discrepancy();
    RegisterClosing {
        id: RegisterClosingId::generate(),
        staff_id: StaffId::generate(),
        expected_cash: input.expected_cash,
        counted_cash: input.counted_cash,
        discrepancy: discrepancy.difference(),
        flagged: discrepancy.is_flagged(),
        notes: input.notes,
        closed_at: Utc::now(),
    }
}

// =============================================================================
// Notification vocabulary
// =============================================================================

#[test]
fn test_every_tag_is_unique_and_parses_back() {
    let mut seen = HashSet::new();
    for notification_type in NotificationType::ALL {
        let tag = notification_type.as_str();
        assert!(seen.insert(tag), "duplicate tag {tag}");
        assert_eq!(tag.parse::<NotificationType>(), Ok(*notification_type));
        assert_eq!(tag, tag.to_lowercase());
    }
    assert_eq!(seen.len(), 30);
}

#[test]
fn test_categories_partition_the_vocabulary() {
    let total: usize = NotificationCategory::ALL
        .iter()
        .map(|c| c.types().len())
        .sum();
    assert_eq!(total, NotificationType::ALL.len());

    assert_eq!(
        NotificationType::CashDiscrepancy.category(),
        NotificationCategory::Staff
    );
    assert_eq!(
        NotificationType::PurchaseOrderReceived.category(),
        NotificationCategory::PurchaseOrders
    );
}

#[test]
fn test_unknown_tag_is_rejected() {
    assert!("CASH_DISCREPANCY".parse::<NotificationType>().is_err());
    assert!("".parse::<NotificationType>().is_err());
}

// =============================================================================
// Cash discrepancy
// =============================================================================

#[test]
fn test_threshold_is_fifty_pesos() {
    assert_eq!(CASH_DISCREPANCY_THRESHOLD, Decimal::new(50, 0));
}

#[test]
fn test_threshold_boundaries() {
    assert!(!CashDiscrepancy::new(dec("1000"), dec("1050")).is_flagged());
    assert!(CashDiscrepancy::new(dec("1000"), dec("1050.01")).is_flagged());
    assert!(CashDiscrepancy::new(dec("1000"), dec("949")).is_flagged());
}

#[test]
fn test_close_out_alerts_follow_threshold() {
    assert!(cash_discrepancy_alert("Ana", &closing("3200", "3250")).is_none());

    let alert = cash_discrepancy_alert("Ana", &closing("3200", "3149")).expect("flagged");
    assert_eq!(alert.notification_type, NotificationType::CashDiscrepancy);
    assert_eq!(alert.metadata["expected_cash"], "3200");
    assert_eq!(alert.metadata["counted_cash"], "3149");
}

// =============================================================================
// Stock levels
// =============================================================================

#[test]
fn test_stock_boundaries() {
    let thresholds = StockThresholds::default();
    assert_eq!(thresholds.classify(0), StockStatus::OutOfStock);
    assert_eq!(thresholds.classify(1), StockStatus::Critical);
    assert_eq!(thresholds.classify(5), StockStatus::Critical);
    assert_eq!(thresholds.classify(6), StockStatus::Low);
    assert_eq!(thresholds.classify(10), StockStatus::Low);
    assert_eq!(thresholds.classify(11), StockStatus::InStock);
}

#[test]
fn test_stock_alerts_use_inventory_tags() {
    let thresholds = StockThresholds::default();
    let product_id = ProductId::generate();

    for (quantity, expected) in [
        (0, Some(NotificationType::OutOfStock)),
        (4, Some(NotificationType::CriticalStock)),
        (9, Some(NotificationType::LowStock)),
        (40, None),
    ] {
        let check = StockCheckInput {
            product_id,
            product_name: "Blue Razz 60ml".to_string(),
            quantity,
        };
        let alert = stock_alert(&thresholds, &check);
        assert_eq!(alert.map(|a| a.notification_type), expected);
        if let Some(t) = expected {
            assert_eq!(t.category(), NotificationCategory::Inventory);
        }
    }
}
