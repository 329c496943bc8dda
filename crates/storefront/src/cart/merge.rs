//! Guest cart merge coordinator.
//!
//! Listens to auth state changes and, once per sign-in, submits the guest
//! cart lines to the account's persisted cart:
//!
//! 1. `SignedIn` with a session, guard clear, local cart non-empty: set the
//!    guard, then submit every line as one batch.
//! 2. Submission succeeds: clear the local cart.
//! 3. Submission fails: clear the guard, keep the local lines for the next
//!    `SignedIn`.
//! 4. `SignedOut`: clear the guard so the next sign-in (any account) merges
//!    again.
//!
//! The guard is flipped with a compare-and-swap inside the synchronous
//! [`MergeCoordinator::handle_event`], before the submission future exists.
//! A burst of `SignedIn` events therefore produces one request.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use vapour_lounge_core::CartLineInput;

use super::auth::{AuthEvent, AuthEventKind, AuthEventSource, AuthSession};
use super::guest::GuestCartStore;
use crate::db::RepositoryError;

/// Errors from submitting a guest cart merge.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The request never got a response.
    #[error("merge request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The storefront answered with a non-success status.
    #[error("merge rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// Writing the persisted cart failed.
    #[error("cart repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Where guest lines end up once the visitor signs in.
#[async_trait]
pub trait CartPersistence: Send + Sync {
    /// Merge `items` into the persisted cart of the session's user.
    async fn merge_guest_cart(
        &self,
        session: &AuthSession,
        items: &[CartLineInput],
    ) -> Result<(), MergeError>;
}

/// Why an event did not lead to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `SignedIn` arrived without a session.
    NoSession,
    /// A merge already ran (or is running) for this sign-in.
    AlreadyMerged,
    /// Nothing in the guest cart.
    EmptyCart,
    /// The event kind is not one the coordinator reacts to.
    Ignored,
}

/// Result of handling one auth event.
#[derive(Debug, Clone)]
pub enum MergeDecision {
    /// The guard is now set; these lines must be submitted.
    Submit {
        session: AuthSession,
        lines: Vec<CartLineInput>,
    },
    /// Signed out; the guard was cleared.
    GuardReset,
    Skip(SkipReason),
}

/// Result of a finished submission.
#[derive(Debug)]
pub enum MergeOutcome {
    /// Lines persisted and the local cart cleared.
    Merged { lines: usize },
    /// Submission failed; local lines kept and the guard cleared.
    Failed(MergeError),
}

impl MergeOutcome {
    #[must_use]
    pub const fn is_merged(&self) -> bool {
        matches!(self, Self::Merged { .. })
    }
}

struct Inner {
    store: Arc<GuestCartStore>,
    persistence: Arc<dyn CartPersistence>,
    merged: AtomicBool,
}

/// Coordinates the one-shot merge of a guest cart on sign-in.
///
/// Cheap to clone; clones share the store, backend and guard.
#[derive(Clone)]
pub struct MergeCoordinator {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for MergeCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeCoordinator")
            .field("merged", &self.has_merged())
            .field("pending_lines", &self.inner.store.get_items().len())
            .finish_non_exhaustive()
    }
}

impl MergeCoordinator {
    /// Create a coordinator for one visitor session.
    #[must_use]
    pub fn new(store: Arc<GuestCartStore>, persistence: Arc<dyn CartPersistence>) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                persistence,
                merged: AtomicBool::new(false),
            }),
        }
    }

    /// Whether a merge has run (or is running) for the current sign-in.
    #[must_use]
    pub fn has_merged(&self) -> bool {
        self.inner.merged.load(Ordering::Acquire)
    }

    /// The guest cart this coordinator drains.
    #[must_use]
    pub fn store(&self) -> &Arc<GuestCartStore> {
        &self.inner.store
    }

    /// Decide what an auth event means for the guest cart.
    ///
    /// Never awaits. When this returns [`MergeDecision::Submit`] the guard is
    /// already set and the caller owns the submission.
    pub fn handle_event(&self, event: &AuthEvent) -> MergeDecision {
        match event.kind {
            AuthEventKind::SignedIn => {
                let Some(session) = event.session.clone() else {
                    return MergeDecision::Skip(SkipReason::NoSession);
                };
                if self.has_merged() {
                    return MergeDecision::Skip(SkipReason::AlreadyMerged);
                }

                let lines = self.inner.store.to_merge_lines();
                if lines.is_empty() {
                    return MergeDecision::Skip(SkipReason::EmptyCart);
                }

                if self
                    .inner
                    .merged
                    .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                    .is_err()
                {
                    return MergeDecision::Skip(SkipReason::AlreadyMerged);
                }

                MergeDecision::Submit { session, lines }
            }
            AuthEventKind::SignedOut => {
                self.inner.merged.store(false, Ordering::Release);
                MergeDecision::GuardReset
            }
            _ => MergeDecision::Skip(SkipReason::Ignored),
        }
    }

    /// Submit lines chosen by [`Self::handle_event`].
    pub async fn submit(&self, session: AuthSession, lines: Vec<CartLineInput>) -> MergeOutcome {
        let user_id = session.user_id;
        match self
            .inner
            .persistence
            .merge_guest_cart(&session, &lines)
            .await
        {
            Ok(()) => {
                self.inner.store.clear_items();
                info!(%user_id, lines = lines.len(), "Guest cart merged");
                MergeOutcome::Merged { lines: lines.len() }
            }
            Err(e) => {
                self.inner.merged.store(false, Ordering::Release);
                warn!(%user_id, error = %e, "Guest cart merge failed, will retry on next sign-in");
                MergeOutcome::Failed(e)
            }
        }
    }

    /// Handle an event and, if it calls for a merge, spawn the submission.
    ///
    /// Returns the submission task so callers may await its outcome.
    pub fn dispatch(&self, event: &AuthEvent) -> Option<JoinHandle<MergeOutcome>> {
        match self.handle_event(event) {
            MergeDecision::Submit { session, lines } => {
                let coordinator = self.clone();
                Some(tokio::spawn(async move {
                    coordinator.submit(session, lines).await
                }))
            }
            MergeDecision::GuardReset => {
                debug!("Signed out, guest cart merge re-armed");
                None
            }
            MergeDecision::Skip(reason) => {
                debug!(?reason, kind = ?event.kind, "No guest cart merge");
                None
            }
        }
    }

    /// Subscribe to `source` and react to its events until the returned
    /// handle is dropped or the source closes.
    #[must_use]
    pub fn spawn(&self, source: &dyn AuthEventSource) -> CoordinatorHandle {
        let mut subscription = source.subscribe();
        let coordinator = self.clone();
        let task = tokio::spawn(async move {
            while let Some(event) = subscription.recv().await {
                // Outcome is logged by `submit`.
                drop(coordinator.dispatch(&event));
            }
            debug!("Auth event source closed, merge coordinator stopping");
        });

        CoordinatorHandle { task }
    }
}

/// Running event loop of a [`MergeCoordinator`].
///
/// Dropping the handle stops the loop and releases the auth subscription.
/// Submissions already in flight run to completion.
#[derive(Debug)]
pub struct CoordinatorHandle {
    task: JoinHandle<()>,
}

impl CoordinatorHandle {
    /// Stop the event loop and wait for it to unwind.
    pub async fn shutdown(mut self) {
        self.task.abort();
        // A cancelled join error is the expected result here.
        let _ = (&mut self.task).await;
    }

    /// Whether the loop has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for CoordinatorHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::time::Duration;

    use rust_decimal::Decimal;
    use tokio::sync::Notify;
    use vapour_lounge_core::{
        GuestCartItem, MAX_LINE_QUANTITY, Price, ProductId, UserId, VariantId,
    };

    use super::*;
    use crate::cart::auth::AuthEventBus;

    /// Records every call; optionally fails or blocks until released.
    #[derive(Default)]
    struct FakePersistence {
        calls: Mutex<Vec<(UserId, Vec<CartLineInput>)>>,
        fail: AtomicBool,
        gate: Option<Notify>,
        called: Notify,
    }

    impl FakePersistence {
        fn gated() -> Self {
            Self {
                gate: Some(Notify::new()),
                ..Self::default()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn release(&self) {
            if let Some(gate) = &self.gate {
                gate.notify_one();
            }
        }
    }

    #[async_trait]
    impl CartPersistence for FakePersistence {
        async fn merge_guest_cart(
            &self,
            session: &AuthSession,
            items: &[CartLineInput],
        ) -> Result<(), MergeError> {
            self.calls
                .lock()
                .unwrap()
                .push((session.user_id, items.to_vec()));
            self.called.notify_one();

            if let Some(gate) = &self.gate {
                gate.notified().await;
            }

            if self.fail.load(Ordering::SeqCst) {
                Err(MergeError::Rejected {
                    status: 503,
                    message: "backend unavailable".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn guest_item(quantity: u32, variant: Option<VariantId>) -> GuestCartItem {
        GuestCartItem {
            product_id: ProductId::generate(),
            variant_id: variant,
            quantity,
            name: "Watermelon Pod".to_string(),
            unit_price: Price::php(Decimal::new(299, 0)),
            image_url: Some("https://cdn.example/pod.png".to_string()),
        }
    }

    fn setup(persistence: FakePersistence) -> (MergeCoordinator, Arc<FakePersistence>) {
        let store = Arc::new(GuestCartStore::new());
        let persistence = Arc::new(persistence);
        let coordinator = MergeCoordinator::new(store, persistence.clone());
        (coordinator, persistence)
    }

    fn signed_in() -> AuthEvent {
        AuthEvent::signed_in(AuthSession::new(UserId::generate(), "access-token"))
    }

    #[tokio::test]
    async fn test_sign_in_submits_mapped_lines_once() {
        let (coordinator, persistence) = setup(FakePersistence::default());
        let a = guest_item(2, Some(VariantId::generate()));
        let b = guest_item(1, None);
        coordinator.store().add_item(a.clone()).unwrap();
        coordinator.store().add_item(b.clone()).unwrap();

        let event = signed_in();
        let outcome = coordinator.dispatch(&event).unwrap().await.unwrap();

        assert!(outcome.is_merged());
        assert_eq!(persistence.call_count(), 1);

        let calls = persistence.calls.lock().unwrap();
        let (user_id, lines) = &calls[0];
        assert_eq!(*user_id, event.session.as_ref().unwrap().user_id);

        let sent: HashSet<_> = lines.iter().copied().collect();
        let expected: HashSet<_> = [CartLineInput::from(&a), CartLineInput::from(&b)]
            .into_iter()
            .collect();
        assert_eq!(sent, expected);
        drop(calls);

        assert!(coordinator.store().is_empty());
        assert!(coordinator.has_merged());
    }

    #[tokio::test]
    async fn test_restored_cart_with_stale_line_still_merges() {
        let valid = guest_item(2, None);
        let stale = guest_item(0, None);
        let oversized = guest_item(MAX_LINE_QUANTITY + 1, None);
        let store = Arc::new(GuestCartStore::from_items(vec![
            valid.clone(),
            stale,
            oversized,
        ]));
        let persistence = Arc::new(FakePersistence::default());
        let coordinator = MergeCoordinator::new(store, persistence.clone());

        let outcome = coordinator.dispatch(&signed_in()).unwrap().await.unwrap();

        assert!(outcome.is_merged());
        let calls = persistence.calls.lock().unwrap();
        assert_eq!(calls[0].1, vec![CartLineInput::from(&valid)]);
    }

    #[tokio::test]
    async fn test_empty_cart_sends_nothing() {
        let (coordinator, persistence) = setup(FakePersistence::default());

        assert!(matches!(
            coordinator.handle_event(&signed_in()),
            MergeDecision::Skip(SkipReason::EmptyCart)
        ));
        assert!(coordinator.dispatch(&signed_in()).is_none());
        assert_eq!(persistence.call_count(), 0);
        assert!(!coordinator.has_merged());
    }

    #[tokio::test]
    async fn test_sign_in_without_session_is_ignored() {
        let (coordinator, persistence) = setup(FakePersistence::default());
        coordinator.store().add_item(guest_item(1, None)).unwrap();

        let event = AuthEvent::new(AuthEventKind::SignedIn, None);
        assert!(matches!(
            coordinator.handle_event(&event),
            MergeDecision::Skip(SkipReason::NoSession)
        ));
        assert_eq!(persistence.call_count(), 0);
        assert!(!coordinator.has_merged());
    }

    #[tokio::test]
    async fn test_other_events_are_ignored() {
        let (coordinator, persistence) = setup(FakePersistence::default());
        coordinator.store().add_item(guest_item(1, None)).unwrap();

        let session = AuthSession::new(UserId::generate(), "t");
        for kind in [
            AuthEventKind::InitialSession,
            AuthEventKind::TokenRefreshed,
            AuthEventKind::UserUpdated,
            AuthEventKind::PasswordRecovery,
        ] {
            let event = AuthEvent::new(kind, Some(session.clone()));
            assert!(coordinator.dispatch(&event).is_none());
        }
        assert_eq!(persistence.call_count(), 0);
        assert_eq!(coordinator.store().item_count(), 1);
    }

    #[tokio::test]
    async fn test_rapid_duplicate_sign_in_submits_once() {
        let (coordinator, persistence) = setup(FakePersistence::gated());
        coordinator.store().add_item(guest_item(3, None)).unwrap();

        let first = coordinator.dispatch(&signed_in()).unwrap();
        // Still in flight: the fake is parked on its gate.
        assert!(coordinator.dispatch(&signed_in()).is_none());
        assert!(coordinator.dispatch(&signed_in()).is_none());

        persistence.release();
        assert!(first.await.unwrap().is_merged());
        assert_eq!(persistence.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_items_and_allows_one_retry() {
        let (coordinator, persistence) = setup(FakePersistence::default());
        persistence.fail.store(true, Ordering::SeqCst);
        let item = guest_item(2, None);
        coordinator.store().add_item(item.clone()).unwrap();

        let outcome = coordinator.dispatch(&signed_in()).unwrap().await.unwrap();
        assert!(matches!(outcome, MergeOutcome::Failed(MergeError::Rejected { status: 503, .. })));
        assert_eq!(coordinator.store().get_items(), vec![item]);
        assert!(!coordinator.has_merged());

        persistence.fail.store(false, Ordering::SeqCst);
        let retry = coordinator.dispatch(&signed_in()).unwrap().await.unwrap();
        assert!(retry.is_merged());
        assert!(coordinator.store().is_empty());

        // The retry succeeded, so a further sign-in event is a no-op.
        assert!(coordinator.dispatch(&signed_in()).is_none());
        assert_eq!(persistence.call_count(), 2);
    }

    #[tokio::test]
    async fn test_sign_out_rearms_merge() {
        let (coordinator, persistence) = setup(FakePersistence::default());
        coordinator.store().add_item(guest_item(1, None)).unwrap();
        assert!(
            coordinator
                .dispatch(&signed_in())
                .unwrap()
                .await
                .unwrap()
                .is_merged()
        );

        coordinator.store().add_item(guest_item(4, None)).unwrap();
        assert!(matches!(
            coordinator.handle_event(&signed_in()),
            MergeDecision::Skip(SkipReason::AlreadyMerged)
        ));

        assert!(matches!(
            coordinator.handle_event(&AuthEvent::signed_out()),
            MergeDecision::GuardReset
        ));
        assert!(!coordinator.has_merged());

        // Another account signs in on the same device.
        let outcome = coordinator.dispatch(&signed_in()).unwrap().await.unwrap();
        assert!(outcome.is_merged());
        assert_eq!(persistence.call_count(), 2);

        let calls = persistence.calls.lock().unwrap();
        assert_ne!(calls[0].0, calls[1].0);
        assert_eq!(calls[1].1[0].quantity, 4);
    }

    #[tokio::test]
    async fn test_guard_set_before_submission_starts() {
        let (coordinator, persistence) = setup(FakePersistence::default());
        coordinator.store().add_item(guest_item(1, None)).unwrap();

        let decision = coordinator.handle_event(&signed_in());
        assert!(matches!(decision, MergeDecision::Submit { .. }));
        assert!(coordinator.has_merged());
        assert_eq!(persistence.call_count(), 0);
    }

    #[tokio::test]
    async fn test_event_loop_merges_on_published_sign_in() {
        let (coordinator, persistence) = setup(FakePersistence::default());
        coordinator.store().add_item(guest_item(2, None)).unwrap();

        let bus = AuthEventBus::new();
        let handle = coordinator.spawn(&bus);

        bus.publish(signed_in());
        bus.publish(AuthEvent::new(
            AuthEventKind::TokenRefreshed,
            Some(AuthSession::new(UserId::generate(), "refreshed")),
        ));

        tokio::time::timeout(Duration::from_secs(1), persistence.called.notified())
            .await
            .unwrap();

        for _ in 0..100 {
            if coordinator.store().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(coordinator.store().is_empty());
        assert_eq!(persistence.call_count(), 1);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_dropping_handle_releases_subscription() {
        let (coordinator, _persistence) = setup(FakePersistence::default());
        let bus = AuthEventBus::new();

        let handle = coordinator.spawn(&bus);
        assert_eq!(bus.subscriber_count(), 1);

        drop(handle);
        for _ in 0..100 {
            if bus.subscriber_count() == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_loop_stops_when_source_closes() {
        let (coordinator, _persistence) = setup(FakePersistence::default());
        let bus = AuthEventBus::new();
        let handle = coordinator.spawn(&bus);

        drop(bus);
        for _ in 0..100 {
            if handle.is_finished() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(handle.is_finished());
    }
}
