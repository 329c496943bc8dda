//! Notification feed handlers.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use serde::Serialize;
use tracing::instrument;
use vapour_lounge_core::NotificationId;

use crate::db::NotificationRepository;
use crate::error::Result;
use crate::middleware::RequireNotificationAccess;
use crate::models::{Notification, NotificationFilter};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
    pub unread_count: i64,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread_count: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkedRead {
    pub updated: u64,
}

/// `GET /api/notifications`
///
/// Unknown `type` or `category` values are a JSON 400 like every other
/// validation error.
#[instrument(skip(state, _staff))]
pub async fn list(
    State(state): State<AppState>,
    RequireNotificationAccess(_staff): RequireNotificationAccess,
    filter: std::result::Result<Query<NotificationFilter>, QueryRejection>,
) -> Result<Json<NotificationList>> {
    let Query(filter) = filter?;
    let repo = NotificationRepository::new(state.pool());
    let notifications = repo.list(&filter).await?;
    let unread_count = repo.unread_count().await?;

    Ok(Json(NotificationList {
        notifications,
        unread_count,
    }))
}

/// `GET /api/notifications/unread-count`
pub async fn unread_count(
    State(state): State<AppState>,
    RequireNotificationAccess(_staff): RequireNotificationAccess,
) -> Result<Json<UnreadCount>> {
    let unread_count = NotificationRepository::new(state.pool())
        .unread_count()
        .await?;
    Ok(Json(UnreadCount { unread_count }))
}

/// `POST /api/notifications/{id}/read`
#[instrument(skip(state, staff), fields(staff_id = %staff.id))]
pub async fn mark_read(
    State(state): State<AppState>,
    RequireNotificationAccess(staff): RequireNotificationAccess,
    id: std::result::Result<Path<NotificationId>, PathRejection>,
) -> Result<Json<MarkedRead>> {
    let Path(id) = id?;
    NotificationRepository::new(state.pool())
        .mark_read(id)
        .await?;
    Ok(Json(MarkedRead { updated: 1 }))
}

/// `POST /api/notifications/read-all`
#[instrument(skip(state, staff), fields(staff_id = %staff.id))]
pub async fn mark_all_read(
    State(state): State<AppState>,
    RequireNotificationAccess(staff): RequireNotificationAccess,
) -> Result<Json<MarkedRead>> {
    let updated = NotificationRepository::new(state.pool())
        .mark_all_read()
        .await?;
    tracing::info!(updated, "Notifications marked read");
    Ok(Json(MarkedRead { updated }))
}
