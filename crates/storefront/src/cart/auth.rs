//! Auth state events and the subscription that delivers them.
//!
//! The auth provider is external. Whatever adapter talks to it publishes
//! [`AuthEvent`]s into an [`AuthEventSource`]; consumers hold an
//! [`AuthSubscription`] and stop receiving as soon as they drop it.

use secrecy::SecretString;
use tokio::sync::broadcast;
use tracing::warn;
use vapour_lounge_core::UserId;

/// Events kept for slow subscribers before they start lagging.
const EVENT_BUFFER: usize = 128;

/// Kind of auth state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthEventKind {
    /// Initial session restored from storage.
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
    PasswordRecovery,
}

/// A signed-in session as reported by the auth provider.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: UserId,
    /// Token presented to the storefront API on the user's behalf.
    pub access_token: SecretString,
}

impl AuthSession {
    #[must_use]
    pub fn new(user_id: UserId, access_token: impl Into<String>) -> Self {
        Self {
            user_id,
            access_token: SecretString::from(access_token.into()),
        }
    }
}

/// One auth state change.
#[derive(Debug, Clone)]
pub struct AuthEvent {
    pub kind: AuthEventKind,
    pub session: Option<AuthSession>,
}

impl AuthEvent {
    #[must_use]
    pub fn new(kind: AuthEventKind, session: Option<AuthSession>) -> Self {
        Self { kind, session }
    }

    #[must_use]
    pub fn signed_in(session: AuthSession) -> Self {
        Self::new(AuthEventKind::SignedIn, Some(session))
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self::new(AuthEventKind::SignedOut, None)
    }
}

/// Anything that can hand out auth event subscriptions.
pub trait AuthEventSource: Send + Sync {
    /// Start receiving events published from now on.
    fn subscribe(&self) -> AuthSubscription;
}

/// Receiving end of an auth event stream.
///
/// Dropping the subscription unsubscribes.
#[derive(Debug)]
pub struct AuthSubscription {
    receiver: broadcast::Receiver<AuthEvent>,
}

impl AuthSubscription {
    #[must_use]
    pub fn new(receiver: broadcast::Receiver<AuthEvent>) -> Self {
        Self { receiver }
    }

    /// Wait for the next event. Returns `None` once the source is gone.
    ///
    /// A lagging subscriber cannot tell whether a sign-out was among the
    /// events it missed, so a lag is reported as [`AuthEvent::signed_out`]
    /// before delivery resumes with the oldest event still buffered.
    pub async fn recv(&mut self) -> Option<AuthEvent> {
        match self.receiver.recv().await {
            Ok(event) => Some(event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "Auth subscription lagged, treating as signed out");
                Some(AuthEvent::signed_out())
            }
            Err(broadcast::error::RecvError::Closed) => None,
        }
    }
}

/// In-process auth event source backed by a broadcast channel.
#[derive(Debug, Clone)]
pub struct AuthEventBus {
    sender: broadcast::Sender<AuthEvent>,
}

impl Default for AuthEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthEventBus {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_BUFFER);
        Self { sender }
    }

    /// Publish an event. Returns how many subscribers received it.
    pub fn publish(&self, event: AuthEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl AuthEventSource for AuthEventBus {
    fn subscribe(&self) -> AuthSubscription {
        AuthSubscription::new(self.sender.subscribe())
    }
}
