//! Cart line types shared by the guest cart and the persisted cart.
//!
//! A [`GuestCartItem`] carries display metadata the visitor's browser keeps
//! around (name, unit price, image). Only the [`CartLineInput`] projection
//! ever crosses the wire when a guest cart is merged into an account.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::{ProductId, VariantId};
use super::price::Price;

/// Upper bound on a single cart line's quantity.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// Errors raised when building or validating cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartItemError {
    /// Quantity must be at least one.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    /// Quantity exceeds the per-line limit.
    #[error("quantity must be at most {max} (got {got})")]
    QuantityTooLarge {
        /// Maximum allowed quantity.
        max: u32,
        /// Requested quantity.
        got: u32,
    },
}

/// Validate a requested line quantity.
///
/// # Errors
///
/// Returns [`CartItemError`] if the quantity is zero or above
/// [`MAX_LINE_QUANTITY`].
pub const fn validate_quantity(quantity: u32) -> Result<u32, CartItemError> {
    if quantity == 0 {
        return Err(CartItemError::ZeroQuantity);
    }
    if quantity > MAX_LINE_QUANTITY {
        return Err(CartItemError::QuantityTooLarge {
            max: MAX_LINE_QUANTITY,
            got: quantity,
        });
    }
    Ok(quantity)
}

/// A cart line held for a visitor who has not signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestCartItem {
    pub product_id: ProductId,
    pub variant_id: Option<VariantId>,
    pub quantity: u32,
    /// Product name at the time it was added.
    pub name: String,
    /// Unit price at the time it was added.
    pub unit_price: Price,
    pub image_url: Option<String>,
}

impl GuestCartItem {
    /// Whether this line refers to the same product/variant pair.
    #[must_use]
    pub fn same_line(&self, product_id: ProductId, variant_id: Option<VariantId>) -> bool {
        self.product_id == product_id && self.variant_id == variant_id
    }
}

/// The merge payload for a single line: product, optional variant, quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartLineInput {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
    pub quantity: u32,
}

impl CartLineInput {
    /// Check the quantity bounds.
    ///
    /// # Errors
    ///
    /// Returns [`CartItemError`] if the quantity is out of range.
    pub const fn validate(&self) -> Result<(), CartItemError> {
        match validate_quantity(self.quantity) {
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl From<&GuestCartItem> for CartLineInput {
    fn from(item: &GuestCartItem) -> Self {
        Self {
            product_id: item.product_id,
            variant_id: item.variant_id,
            quantity: item.quantity,
        }
    }
}
