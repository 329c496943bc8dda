//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Cart API (requires a signed-in session)
//! GET  /api/cart               - Persisted cart of the current user
//! POST /api/cart/merge         - Merge a guest cart into the persisted cart
//! ```

pub mod cart;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart API router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/merge", post(cart::merge))
}

/// Create the main application router.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api/cart", cart_routes())
}
