//! Domain models for storefront.

pub mod cart;
pub mod session;

pub use cart::{CartLineView, CartView, PersistedCartItem};
pub use session::{CurrentUser, keys as session_keys};
