//! HTTP client for the storefront merge endpoint.
//!
//! Used where the guest cart lives outside the storefront process (a kiosk,
//! a native shell around the site). The session token is presented as the
//! storefront session cookie, the same way a browser would.

use async_trait::async_trait;
use reqwest::header::COOKIE;
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::instrument;
use vapour_lounge_core::CartLineInput;

use super::auth::AuthSession;
use super::merge::{CartPersistence, MergeError};
use crate::middleware::SESSION_COOKIE_NAME;

/// Path of the merge endpoint, relative to the storefront base URL.
pub const MERGE_PATH: &str = "/api/cart/merge";

/// Request body for `POST /api/cart/merge`.
#[derive(Debug, Serialize)]
struct MergeRequest<'a> {
    items: &'a [CartLineInput],
}

/// Calls the storefront's merge endpoint.
#[derive(Debug, Clone)]
pub struct MergeApiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl MergeApiClient {
    /// Create a client for the storefront at `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing connection pool.
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}{MERGE_PATH}", base_url.trim_end_matches('/')),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CartPersistence for MergeApiClient {
    #[instrument(skip(self, session, items), fields(user_id = %session.user_id, lines = items.len()))]
    async fn merge_guest_cart(
        &self,
        session: &AuthSession,
        items: &[CartLineInput],
    ) -> Result<(), MergeError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(
                COOKIE,
                format!(
                    "{SESSION_COOKIE_NAME}={}",
                    session.access_token.expose_secret()
                ),
            )
            .json(&MergeRequest { items })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        Err(MergeError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
