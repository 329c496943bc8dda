//! Cart API handlers.
//!
//! Guest carts live on the client. Once a visitor signs in, the merge
//! coordinator posts the guest lines here exactly once; from then on the
//! persisted cart is the only source of truth.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;
use vapour_lounge_core::CartLineInput;

use crate::db::CartRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::CartView;
use crate::state::AppState;

/// Body of `POST /api/cart/merge`.
#[derive(Debug, Deserialize)]
pub struct MergeCartRequest {
    pub items: Vec<CartLineInput>,
}

impl MergeCartRequest {
    /// Reject empty batches and invalid quantities before touching the
    /// database.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an empty batch and
    /// `AppError::InvalidCart` for the first invalid line.
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(AppError::BadRequest("no items to merge".to_string()));
        }
        for item in &self.items {
            item.validate()?;
        }
        Ok(())
    }
}

/// `GET /api/cart`
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<CartView>> {
    let items = CartRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(CartView::from(items)))
}

/// `POST /api/cart/merge`
#[instrument(skip(state, user, request), fields(user_id = %user.id, lines = request.items.len()))]
pub async fn merge(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<MergeCartRequest>,
) -> Result<Json<CartView>> {
    request.validate()?;

    let repo = CartRepository::new(state.pool());
    let written = repo.merge_items(user.id, &request.items).await?;
    tracing::info!(written, "Guest cart merged");

    let items = repo.list_for_user(user.id).await?;
    Ok(Json(CartView::from(items)))
}
