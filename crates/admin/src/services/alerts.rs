//! Back-office alerting.
//!
//! Register close-outs and stock movements are the two places where the
//! back-office decides on its own that someone should be told. Everything
//! else in the notification feed is written by the page that made the change.
//!
//! Deciding and storing are split: [`cash_discrepancy_alert`] and
//! [`stock_alert`] only build the notification, [`AlertService`] persists it.

use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use vapour_lounge_core::{
    CASH_DISCREPANCY_THRESHOLD, NotificationType, Price, StockStatus, StockThresholds,
};

use crate::db::{RepositoryError, notifications, register};
use crate::models::{
    CloseRegisterInput, CurrentStaff, NewNotification, RegisterClosing, StockCheckInput,
    StockCheckResult,
};

/// Link attached to cash discrepancy alerts.
pub const REGISTER_LINK: &str = "/pos/register";

/// Link attached to stock alerts.
pub const INVENTORY_LINK: &str = "/inventory";

fn peso(amount: Decimal) -> String {
    Price::php(amount).display()
}

/// Build the alert for a close-out, if its discrepancy is flagged.
#[must_use]
pub fn cash_discrepancy_alert(
    staff_name: &str,
    closing: &RegisterClosing,
) -> Option<NewNotification> {
    if !closing.flagged {
        return None;
    }

    let direction = if closing.cash().is_short() {
        "short"
    } else {
        "over"
    };

    let message = format!(
        "{staff_name} closed the register {direction} by {}: expected {}, counted {}.",
        peso(closing.discrepancy.abs()),
        peso(closing.expected_cash),
        peso(closing.counted_cash),
    );

    Some(
        NewNotification::new(NotificationType::CashDiscrepancy, "Cash discrepancy", message)
            .with_link(REGISTER_LINK)
            .with_metadata(json!({
                "register_closing_id": closing.id,
                "staff_id": closing.staff_id,
                "expected_cash": closing.expected_cash,
                "counted_cash": closing.counted_cash,
                "discrepancy": closing.discrepancy,
                "threshold": CASH_DISCREPANCY_THRESHOLD,
            })),
    )
}

/// Build the alert for a stock level, if it is below the healthy range.
#[must_use]
pub fn stock_alert(
    thresholds: &StockThresholds,
    check: &StockCheckInput,
) -> Option<NewNotification> {
    let status = thresholds.classify(check.quantity);
    let notification_type = status.notification_type()?;

    let message = match status {
        StockStatus::OutOfStock => format!("{} is out of stock.", check.product_name),
        _ => format!(
            "{} has {} unit(s) left.",
            check.product_name, check.quantity
        ),
    };

    Some(
        NewNotification::new(notification_type, status.label(), message)
            .with_link(INVENTORY_LINK)
            .with_metadata(json!({
                "product_id": check.product_id,
                "quantity": check.quantity,
                "low_threshold": thresholds.low,
                "critical_threshold": thresholds.critical,
            })),
    )
}

/// Persists close-outs and stock checks together with their alerts.
pub struct AlertService {
    pool: PgPool,
    thresholds: StockThresholds,
}

impl AlertService {
    #[must_use]
    pub const fn new(pool: PgPool, thresholds: StockThresholds) -> Self {
        Self { pool, thresholds }
    }

    /// Record a register close-out.
    ///
    /// The closing and its alert are written in one transaction, so a flagged
    /// closing never exists without its `cash_discrepancy` notification.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either write fails.
    #[instrument(skip(self, staff, input), fields(staff_id = %staff.id))]
    pub async fn close_register(
        &self,
        staff: &CurrentStaff,
        input: &CloseRegisterInput,
    ) -> Result<RegisterClosing, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let closing = register::insert(&mut *tx, staff.id, input).await?;
        if let Some(alert) = cash_discrepancy_alert(&staff.name, &closing) {
            notifications::insert(&mut *tx, &alert).await?;
            warn!(
                closing_id = %closing.id,
                discrepancy = %closing.discrepancy,
                "Cash discrepancy flagged"
            );
        }

        tx.commit().await?;

        info!(closing_id = %closing.id, flagged = closing.flagged, "Register closed");
        Ok(closing)
    }

    /// Classify a product's stock and raise the matching inventory alert.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the alert cannot be stored.
    #[instrument(skip(self, check), fields(product_id = %check.product_id, quantity = check.quantity))]
    pub async fn check_stock(
        &self,
        check: &StockCheckInput,
    ) -> Result<StockCheckResult, RepositoryError> {
        let status = self.thresholds.classify(check.quantity);
        let alert = stock_alert(&self.thresholds, check);
        let alerted = alert.is_some();

        if let Some(alert) = alert {
            notifications::insert(&self.pool, &alert).await?;
            info!(status = status.label(), "Stock alert raised");
        }

        Ok(StockCheckResult {
            product_id: check.product_id,
            status,
            alerted,
        })
    }
}
