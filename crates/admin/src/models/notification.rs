//! Admin notification models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vapour_lounge_core::{NotificationCategory, NotificationId, NotificationType};

/// Default page size for the notification list.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Largest page the list endpoint will return.
pub const MAX_PAGE_SIZE: i64 = 200;

/// A stored admin notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub category: NotificationCategory,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub metadata: serde_json::Value,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// A notification about to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub metadata: serde_json::Value,
}

impl NewNotification {
    /// Create a notification without a link or metadata.
    #[must_use]
    pub fn new(
        notification_type: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            notification_type,
            title: title.into(),
            message: message.into(),
            link: None,
            metadata: serde_json::Value::Object(serde_json::Map::new()),
        }
    }

    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Query parameters of the notification list.
///
/// `type` wins over `category` when both are given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationFilter {
    #[serde(rename = "type")]
    pub notification_type: Option<NotificationType>,
    pub category: Option<NotificationCategory>,
    #[serde(default)]
    pub unread: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl NotificationFilter {
    /// Tags to match, or `None` for all.
    #[must_use]
    pub fn tags(&self) -> Option<Vec<String>> {
        if let Some(t) = self.notification_type {
            return Some(vec![t.as_str().to_string()]);
        }
        self.category.map(|c| {
            c.types()
                .into_iter()
                .map(|t| t.as_str().to_string())
                .collect()
        })
    }

    /// Page size clamped to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}
