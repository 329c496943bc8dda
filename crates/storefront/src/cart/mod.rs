//! Guest cart and the sign-in merge flow.
//!
//! A visitor can fill a cart before having an account. That cart lives in a
//! [`GuestCartStore`] owned by the visitor's session. When the auth source
//! reports a sign-in, the [`MergeCoordinator`] pushes the guest lines into the
//! account's persisted cart once, then empties the local store.
//!
//! ```text
//! AuthEventSource ──subscribe──▶ AuthSubscription
//!                                     │ SignedIn / SignedOut
//!                                     ▼
//!                              MergeCoordinator ──▶ CartPersistence
//!                                     │                 (MergeApiClient)
//!                                     ▼
//!                               GuestCartStore
//! ```

pub mod auth;
pub mod client;
pub mod guest;
pub mod merge;

pub use auth::{
    AuthEvent, AuthEventBus, AuthEventKind, AuthEventSource, AuthSession, AuthSubscription,
};
pub use client::MergeApiClient;
pub use guest::GuestCartStore;
pub use merge::{
    CartPersistence, CoordinatorHandle, MergeCoordinator, MergeDecision, MergeError, MergeOutcome,
    SkipReason,
};
