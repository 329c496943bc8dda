//! Notification repository.
//!
//! The type tag is stored as text in `notification_type`; rows whose tag no
//! longer parses are reported as data corruption rather than dropped.

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use tracing::instrument;
use vapour_lounge_core::{NotificationId, NotificationType};

use super::RepositoryError;
use crate::models::{NewNotification, Notification, NotificationFilter};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: NotificationId,
    notification_type: String,
    title: String,
    message: String,
    link: Option<String>,
    metadata: serde_json::Value,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = RepositoryError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let notification_type: NotificationType = row.notification_type.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("notification {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            notification_type,
            category: notification_type.category(),
            title: row.title,
            message: row.message,
            link: row.link,
            metadata: row.metadata,
            is_read: row.is_read,
            created_at: row.created_at,
        })
    }
}

/// Insert a notification on any executor, so callers can write it inside
/// their own transaction.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert<'e, E>(
    executor: E,
    notification: &NewNotification,
) -> Result<Notification, RepositoryError>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, NotificationRow>(
        r"
        INSERT INTO admin.notification (notification_type, title, message, link, metadata)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, notification_type, title, message, link, metadata, is_read, created_at
        ",
    )
    .bind(notification.notification_type.as_str())
    .bind(&notification.title)
    .bind(&notification.message)
    .bind(notification.link.as_deref())
    .bind(&notification.metadata)
    .fetch_one(executor)
    .await?;

    row.try_into()
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for admin notifications.
pub struct NotificationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NotificationRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a new notification.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, notification), fields(notification_type = %notification.notification_type))]
    pub async fn create(
        &self,
        notification: &NewNotification,
    ) -> Result<Notification, RepositoryError> {
        insert(self.pool, notification).await
    }

    /// List notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored tag is unknown.
    pub async fn list(
        &self,
        filter: &NotificationFilter,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            r"
            SELECT id, notification_type, title, message, link, metadata, is_read, created_at
            FROM admin.notification
            WHERE ($1::text[] IS NULL OR notification_type = ANY($1))
              AND (NOT $2 OR is_read = FALSE)
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(filter.tags())
        .bind(filter.unread)
        .bind(filter.limit())
        .bind(filter.offset())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Number of unread notifications.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn unread_count(&self) -> Result<i64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM admin.notification WHERE is_read = FALSE")
                .fetch_one(self.pool)
                .await?;
        Ok(count)
    }

    /// Mark one notification as read.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no notification has this ID.
    pub async fn mark_read(&self, id: NotificationId) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE admin.notification SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Mark every unread notification as read. Returns how many changed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_all_read(&self) -> Result<u64, RepositoryError> {
        let result =
            sqlx::query("UPDATE admin.notification SET is_read = TRUE WHERE is_read = FALSE")
                .execute(self.pool)
                .await?;
        Ok(result.rows_affected())
    }
}
