//! Session-scoped guest cart store.
//!
//! One store exists per visitor session and is shared by `Arc` between the
//! cart handlers and the merge coordinator. The lock is never held across an
//! await point.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::warn;
use vapour_lounge_core::{
    CartItemError, CartLineInput, GuestCartItem, MAX_LINE_QUANTITY, ProductId, VariantId,
    validate_quantity,
};

/// Cart lines held for a visitor who is not signed in.
#[derive(Debug, Default)]
pub struct GuestCartStore {
    items: Mutex<Vec<GuestCartItem>>,
}

impl GuestCartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a store from previously saved lines.
    ///
    /// Lines go through [`Self::add_item`]: duplicates are combined and a
    /// line with an out-of-range quantity is dropped, so one stale line
    /// cannot make every merge batch invalid.
    #[must_use]
    pub fn from_items(items: Vec<GuestCartItem>) -> Self {
        let store = Self::new();
        for item in items {
            let (product_id, variant_id) = (item.product_id, item.variant_id);
            if let Err(error) = store.add_item(item) {
                warn!(%product_id, ?variant_id, %error, "Dropping saved guest cart line");
            }
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, Vec<GuestCartItem>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a line, or bump the quantity of an existing line for the same
    /// product and variant. The combined quantity is capped at
    /// [`MAX_LINE_QUANTITY`].
    ///
    /// # Errors
    ///
    /// Returns [`CartItemError`] if the item's own quantity is out of range.
    pub fn add_item(&self, item: GuestCartItem) -> Result<(), CartItemError> {
        validate_quantity(item.quantity)?;

        let mut items = self.lock();
        if let Some(existing) = items
            .iter_mut()
            .find(|i| i.same_line(item.product_id, item.variant_id))
        {
            existing.quantity = existing
                .quantity
                .saturating_add(item.quantity)
                .min(MAX_LINE_QUANTITY);
        } else {
            items.push(item);
        }
        Ok(())
    }

    /// Set a line's quantity. Zero removes the line.
    ///
    /// Returns `false` if no such line exists.
    ///
    /// # Errors
    ///
    /// Returns [`CartItemError::QuantityTooLarge`] above the line limit.
    pub fn update_quantity(
        &self,
        product_id: ProductId,
        variant_id: Option<VariantId>,
        quantity: u32,
    ) -> Result<bool, CartItemError> {
        if quantity == 0 {
            return Ok(self.remove_item(product_id, variant_id));
        }
        validate_quantity(quantity)?;

        let mut items = self.lock();
        Ok(items
            .iter_mut()
            .find(|i| i.same_line(product_id, variant_id))
            .map(|line| line.quantity = quantity)
            .is_some())
    }

    /// Remove a line. Returns whether anything was removed.
    pub fn remove_item(&self, product_id: ProductId, variant_id: Option<VariantId>) -> bool {
        let mut items = self.lock();
        let before = items.len();
        items.retain(|i| !i.same_line(product_id, variant_id));
        items.len() != before
    }

    /// Snapshot of the current lines.
    #[must_use]
    pub fn get_items(&self) -> Vec<GuestCartItem> {
        self.lock().clone()
    }

    /// Drop every line.
    pub fn clear_items(&self) {
        self.lock().clear();
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lock().iter().map(|i| i.quantity).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Lines projected to the merge payload.
    #[must_use]
    pub fn to_merge_lines(&self) -> Vec<CartLineInput> {
        self.lock().iter().map(CartLineInput::from).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use vapour_lounge_core::Price;

    use super::*;

    fn line(product_id: ProductId, variant_id: Option<VariantId>, quantity: u32) -> GuestCartItem {
        GuestCartItem {
            product_id,
            variant_id,
            quantity,
            name: "Grape Salt Nic".to_string(),
            unit_price: Price::php(Decimal::new(380, 0)),
            image_url: None,
        }
    }

    #[test]
    fn test_add_same_line_increments() {
        let store = GuestCartStore::new();
        let product = ProductId::generate();

        store.add_item(line(product, None, 2)).unwrap();
        store.add_item(line(product, None, 3)).unwrap();

        let items = store.get_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
    }

    #[test]
    fn test_variants_are_separate_lines() {
        let store = GuestCartStore::new();
        let product = ProductId::generate();

        store
            .add_item(line(product, Some(VariantId::generate()), 1))
            .unwrap();
        store
            .add_item(line(product, Some(VariantId::generate()), 1))
            .unwrap();
        store.add_item(line(product, None, 1)).unwrap();

        assert_eq!(store.get_items().len(), 3);
        assert_eq!(store.item_count(), 3);
    }

    #[test]
    fn test_add_caps_quantity() {
        let store = GuestCartStore::new();
        let product = ProductId::generate();

        store.add_item(line(product, None, 90)).unwrap();
        store.add_item(line(product, None, 20)).unwrap();

        assert_eq!(store.get_items()[0].quantity, MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_add_rejects_zero_quantity() {
        let store = GuestCartStore::new();
        let err = store
            .add_item(line(ProductId::generate(), None, 0))
            .unwrap_err();
        assert_eq!(err, CartItemError::ZeroQuantity);
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_to_zero_removes() {
        let store = GuestCartStore::new();
        let product = ProductId::generate();
        store.add_item(line(product, None, 2)).unwrap();

        assert!(store.update_quantity(product, None, 0).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_missing_line() {
        let store = GuestCartStore::new();
        assert!(
            !store
                .update_quantity(ProductId::generate(), None, 4)
                .unwrap()
        );
    }

    #[test]
    fn test_update_sets_quantity() {
        let store = GuestCartStore::new();
        let product = ProductId::generate();
        store.add_item(line(product, None, 2)).unwrap();

        assert!(store.update_quantity(product, None, 7).unwrap());
        assert_eq!(store.item_count(), 7);
    }

    #[test]
    fn test_restore_drops_invalid_lines_and_combines_duplicates() {
        let kept = ProductId::generate();
        let store = GuestCartStore::from_items(vec![
            line(kept, None, 2),
            line(ProductId::generate(), None, 0),
            line(ProductId::generate(), None, MAX_LINE_QUANTITY + 1),
            line(kept, None, 3),
        ]);

        let items = store.get_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, kept);
        assert_eq!(items[0].quantity, 5);
        assert!(store.to_merge_lines().iter().all(|l| l.validate().is_ok()));
    }

    #[test]
    fn test_to_merge_lines_and_clear() {
        let variant = VariantId::generate();
        let product = ProductId::generate();
        let store = GuestCartStore::from_items(vec![line(product, Some(variant), 3)]);

        let lines = store.to_merge_lines();
        assert_eq!(
            lines,
            vec![CartLineInput {
                product_id: product,
                variant_id: Some(variant),
                quantity: 3,
            }]
        );

        store.clear_items();
        assert!(store.is_empty());
        assert!(store.to_merge_lines().is_empty());
    }
}
