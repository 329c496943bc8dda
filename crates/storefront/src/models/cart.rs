//! Persisted cart models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use vapour_lounge_core::{CartItemId, ProductId, UserId, VariantId};

/// A cart line owned by a signed-in account.
#[derive(Debug, Clone, Serialize)]
pub struct PersistedCartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub variant_id: Option<VariantId>,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of the cart as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub id: CartItemId,
    pub product_id: ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
    pub quantity: u32,
}

/// Cart payload for `GET /api/cart` and the merge response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            item_count: 0,
        }
    }
}

impl From<&PersistedCartItem> for CartLineView {
    fn from(item: &PersistedCartItem) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            variant_id: item.variant_id,
            quantity: item.quantity,
        }
    }
}

impl From<Vec<PersistedCartItem>> for CartView {
    fn from(items: Vec<PersistedCartItem>) -> Self {
        Self {
            item_count: items.iter().map(|i| i.quantity).sum(),
            items: items.iter().map(CartLineView::from).collect(),
        }
    }
}
