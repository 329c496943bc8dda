//! Persisted cart repository.
//!
//! A persisted cart line is keyed by `(user_id, product_id, variant_id)`.
//! Merging a line that already exists adds the quantities, capped at the
//! per-line maximum.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use vapour_lounge_core::{
    CartItemId, CartLineInput, MAX_LINE_QUANTITY, ProductId, UserId, VariantId,
};

use super::RepositoryError;
use crate::models::PersistedCartItem;

#[derive(sqlx::FromRow)]
struct CartItemRow {
    id: CartItemId,
    user_id: UserId,
    product_id: ProductId,
    variant_id: Option<VariantId>,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CartItemRow> for PersistedCartItem {
    type Error = RepositoryError;

    fn try_from(row: CartItemRow) -> Result<Self, Self::Error> {
        let quantity = u32::try_from(row.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "negative quantity {} on cart item {}",
                row.quantity, row.id
            ))
        })?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            product_id: row.product_id,
            variant_id: row.variant_id,
            quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Collapse repeated `(product, variant)` pairs into one line each.
///
/// A single `INSERT ... ON CONFLICT` cannot touch the same row twice, so
/// duplicates in a merge batch are summed up front.
#[must_use]
pub fn coalesce_lines(items: &[CartLineInput]) -> Vec<CartLineInput> {
    let mut merged: Vec<CartLineInput> = Vec::with_capacity(items.len());
    for item in items {
        if let Some(existing) = merged
            .iter_mut()
            .find(|m| m.product_id == item.product_id && m.variant_id == item.variant_id)
        {
            existing.quantity = existing
                .quantity
                .saturating_add(item.quantity)
                .min(MAX_LINE_QUANTITY);
        } else {
            merged.push(CartLineInput {
                quantity: item.quantity.min(MAX_LINE_QUANTITY),
                ..*item
            });
        }
    }
    merged
}

/// Repository for persisted cart lines.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All cart lines of a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PersistedCartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            r"
            SELECT id, user_id, product_id, variant_id, quantity, created_at, updated_at
            FROM storefront.cart_item
            WHERE user_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(PersistedCartItem::try_from).collect()
    }

    /// Merge a batch of lines into a user's cart in one transaction.
    ///
    /// Returns the number of distinct lines written.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any write fails; nothing is
    /// committed in that case.
    #[instrument(skip(self, items), fields(lines = items.len()))]
    pub async fn merge_items(
        &self,
        user_id: UserId,
        items: &[CartLineInput],
    ) -> Result<usize, RepositoryError> {
        let lines = coalesce_lines(items);
        let max = i32::try_from(MAX_LINE_QUANTITY).unwrap_or(i32::MAX);

        let mut tx = self.pool.begin().await?;
        for line in &lines {
            sqlx::query(
                r"
                INSERT INTO storefront.cart_item (user_id, product_id, variant_id, quantity)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (user_id, product_id, variant_id)
                DO UPDATE SET quantity = LEAST(storefront.cart_item.quantity + EXCLUDED.quantity, $5),
                              updated_at = NOW()
                ",
            )
            .bind(user_id)
            .bind(line.product_id)
            .bind(line.variant_id)
            .bind(i32::try_from(line.quantity).unwrap_or(max))
            .bind(max)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(lines.len())
    }
}
