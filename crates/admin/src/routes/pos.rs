//! POS register handlers.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use tracing::instrument;
use vapour_lounge_core::Price;

use crate::db::RegisterRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::models::{CloseRegisterInput, RegisterClosing};
use crate::state::AppState;

/// Close-outs shown on the register history page.
const RECENT_CLOSINGS: i64 = 30;

/// Centavos are the smallest unit a register records.
const CASH_DECIMAL_PLACES: u32 = 2;

/// Largest amount the `NUMERIC(12, 2)` cash columns hold.
fn max_cash() -> Decimal {
    Decimal::new(999_999_999_999, CASH_DECIMAL_PLACES)
}

/// Reject amounts no drawer can hold.
///
/// Amounts must already be in centavos so that the stored row and its flag
/// agree.
fn validate(input: &CloseRegisterInput) -> Result<()> {
    for (label, amount) in [
        ("expected cash", input.expected_cash),
        ("counted cash", input.counted_cash),
    ] {
        if amount.is_sign_negative() {
            return Err(AppError::BadRequest(format!(
                "{label} must not be negative"
            )));
        }
        if amount.normalize().scale() > CASH_DECIMAL_PLACES {
            return Err(AppError::BadRequest(format!(
                "{label} must not have more than {CASH_DECIMAL_PLACES} decimal places"
            )));
        }
        if amount > max_cash() {
            return Err(AppError::BadRequest(format!(
                "{label} must be at most {}",
                Price::php(max_cash()).display()
            )));
        }
    }
    Ok(())
}

/// `POST /api/pos/register/close`
#[instrument(skip(state, staff, input), fields(staff_id = %staff.id))]
pub async fn close_register(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(input): Json<CloseRegisterInput>,
) -> Result<Json<RegisterClosing>> {
    validate(&input)?;
    let closing = state.alerts().close_register(&staff, &input).await?;
    Ok(Json(closing))
}

/// `GET /api/pos/register/closings`
pub async fn list_closings(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> Result<Json<Vec<RegisterClosing>>> {
    let closings = RegisterRepository::new(state.pool())
        .list_recent(RECENT_CLOSINGS)
        .await?;
    Ok(Json(closings))
}
