//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (database)
//!
//! # Notifications (staff session, not cashiers)
//! GET  /api/notifications               - List (?type=&category=&unread=&limit=&offset=)
//! GET  /api/notifications/unread-count  - Unread badge count
//! POST /api/notifications/{id}/read     - Mark one as read
//! POST /api/notifications/read-all      - Mark all as read
//!
//! # POS (staff session)
//! POST /api/pos/register/close          - Record a register close-out
//! GET  /api/pos/register/closings       - Recent close-outs
//!
//! # Inventory (staff session)
//! POST /api/inventory/stock-check       - Classify stock, raise alerts
//! ```

pub mod inventory;
pub mod notifications;
pub mod pos;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the notification routes router.
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list))
        .route("/unread-count", get(notifications::unread_count))
        .route("/read-all", post(notifications::mark_all_read))
        .route("/{id}/read", post(notifications::mark_read))
}

/// Create the POS routes router.
pub fn pos_routes() -> Router<AppState> {
    Router::new()
        .route("/register/close", post(pos::close_register))
        .route("/register/closings", get(pos::list_closings))
}

/// Create the inventory routes router.
pub fn inventory_routes() -> Router<AppState> {
    Router::new().route("/stock-check", post(inventory::stock_check))
}

/// Create the main application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/notifications", notification_routes())
        .nest("/api/pos", pos_routes())
        .nest("/api/inventory", inventory_routes())
}
