//! Inventory models.

use serde::{Deserialize, Serialize};
use vapour_lounge_core::{ProductId, StockStatus};

/// Body of `POST /api/inventory/stock-check`.
#[derive(Debug, Clone, Deserialize)]
pub struct StockCheckInput {
    pub product_id: ProductId,
    pub product_name: String,
    /// Units on hand after the movement that triggered the check.
    pub quantity: u32,
}

/// Outcome of a stock check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockCheckResult {
    pub product_id: ProductId,
    pub status: StockStatus,
    /// Whether an inventory alert was raised.
    pub alerted: bool,
}
