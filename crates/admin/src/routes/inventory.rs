//! Inventory handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::models::{StockCheckInput, StockCheckResult};
use crate::state::AppState;

/// `POST /api/inventory/stock-check`
///
/// Called by stock movements (sales, adjustments, batch depletion) with the
/// new on-hand quantity.
#[instrument(skip(state, _staff, input), fields(product_id = %input.product_id))]
pub async fn stock_check(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<StockCheckInput>,
) -> Result<Json<StockCheckResult>> {
    if input.product_name.trim().is_empty() {
        return Err(AppError::BadRequest("product name is required".to_string()));
    }
    let result = state.alerts().check_stock(&input).await?;
    Ok(Json(result))
}
