//! Register close-out repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool};
use vapour_lounge_core::{RegisterClosingId, StaffId};

use super::RepositoryError;
use crate::models::{CloseRegisterInput, RegisterClosing};

#[derive(Debug, sqlx::FromRow)]
struct RegisterClosingRow {
    id: RegisterClosingId,
    staff_id: StaffId,
    expected_cash: Decimal,
    counted_cash: Decimal,
    discrepancy: Decimal,
    flagged: bool,
    notes: Option<String>,
    closed_at: DateTime<Utc>,
}

impl From<RegisterClosingRow> for RegisterClosing {
    fn from(row: RegisterClosingRow) -> Self {
        Self {
            id: row.id,
            staff_id: row.staff_id,
            expected_cash: row.expected_cash,
            counted_cash: row.counted_cash,
            discrepancy: row.discrepancy,
            flagged: row.flagged,
            notes: row.notes,
            closed_at: row.closed_at,
        }
    }
}

/// Record a close-out on any executor.
///
/// The discrepancy and flag are computed here from the input, never taken
/// from the client.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert<'e, E>(
    executor: E,
    staff_id: StaffId,
    input: &CloseRegisterInput,
) -> Result<RegisterClosing, RepositoryError>
where
    E: PgExecutor<'e>,
{
    let discrepancy = input.discrepancy();

    let row = sqlx::query_as::<_, RegisterClosingRow>(
        r"
        INSERT INTO admin.register_closing
            (staff_id, expected_cash, counted_cash, discrepancy, flagged, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, staff_id, expected_cash, counted_cash, discrepancy, flagged, notes, closed_at
        ",
    )
    .bind(staff_id)
    .bind(input.expected_cash)
    .bind(input.counted_cash)
    .bind(discrepancy.difference())
    .bind(discrepancy.is_flagged())
    .bind(input.notes.as_deref())
    .fetch_one(executor)
    .await?;

    Ok(row.into())
}

/// Read access to register close-outs.
pub struct RegisterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RegisterRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Most recent close-outs, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<RegisterClosing>, RepositoryError> {
        let rows = sqlx::query_as::<_, RegisterClosingRow>(
            r"
            SELECT id, staff_id, expected_cash, counted_cash, discrepancy, flagged, notes, closed_at
            FROM admin.register_closing
            ORDER BY closed_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
