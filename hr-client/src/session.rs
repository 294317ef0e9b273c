//! Session/Identity context
//!
//! The token is the only session state. Identity, role and display name
//! are decoded from its payload on every read, so they cannot drift from
//! the token. Every change is published on a `watch` channel so guards
//! and views re-evaluate together.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use shared::client::TokenClaims;
use shared::models::Role;
use tokio::sync::watch;

use crate::error::{ClientError, ClientResult};
use crate::storage::TokenStorage;

/// Identity carried by the current token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub account_id: String,
    pub email: String,
    pub role: Role,
    pub name: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionIdentity {
    /// Decode the payload segment of a token. The signature is not
    /// checked here; the server does that on every request.
    pub fn decode(token: &str) -> ClientResult<Self> {
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| ClientError::Session("token has no payload".into()))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| ClientError::Session(format!("token payload: {e}")))?;
        let claims: TokenClaims = serde_json::from_slice(&bytes)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| ClientError::Session("token expiry out of range".into()))?;

        Ok(Self {
            account_id: claims.sub,
            email: claims.email,
            role: claims.role,
            name: claims.name,
            expires_at,
        })
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Name to show in the header; falls back to the email
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// Holder of the current token
#[derive(Debug)]
pub struct SessionContext {
    token: watch::Sender<Option<String>>,
    storage: Option<TokenStorage>,
}

impl SessionContext {
    /// Session that is never persisted
    pub fn in_memory() -> Self {
        Self {
            token: watch::Sender::new(None),
            storage: None,
        }
    }

    /// Restore the persisted token. An undecodable or expired token is
    /// discarded and removed from storage.
    pub fn from_storage(storage: TokenStorage) -> Self {
        let token = storage.load().filter(|token| match SessionIdentity::decode(token) {
            Ok(identity) if !identity.is_expired() => true,
            Ok(_) => {
                tracing::info!("Stored session token expired");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable stored token");
                false
            }
        });
        if token.is_none()
            && let Err(e) = storage.delete()
        {
            tracing::warn!(error = %e, "Failed to remove stored token");
        }

        Self {
            token: watch::Sender::new(token),
            storage: Some(storage),
        }
    }

    /// Adopt a freshly issued token. Rejected without side effects when
    /// the payload cannot be decoded.
    pub fn login(&self, token: impl Into<String>) -> ClientResult<SessionIdentity> {
        let token = token.into();
        let identity = SessionIdentity::decode(&token)?;
        if let Some(storage) = &self.storage
            && let Err(e) = storage.save(&token)
        {
            tracing::warn!(error = %e, "Failed to persist session token");
        }
        self.token.send_replace(Some(token));
        tracing::info!(email = %identity.email, role = %identity.role, "Signed in");
        Ok(identity)
    }

    /// Clear the token and everything derived from it in one step
    pub fn logout(&self) {
        if let Some(storage) = &self.storage
            && let Err(e) = storage.delete()
        {
            tracing::warn!(error = %e, "Failed to remove stored token");
        }
        let previous = self.token.send_replace(None);
        if previous.is_some() {
            tracing::info!("Signed out");
        }
    }

    /// Current token, if it still decodes and has not expired
    pub fn token(&self) -> Option<String> {
        let token = self.token.borrow().clone()?;
        match SessionIdentity::decode(&token) {
            Ok(identity) if !identity.is_expired() => Some(token),
            _ => None,
        }
    }

    /// Identity of the signed-in account; `None` when absent, undecodable
    /// or expired
    pub fn identity(&self) -> Option<SessionIdentity> {
        let token = self.token.borrow();
        let identity = SessionIdentity::decode(token.as_deref()?).ok()?;
        (!identity.is_expired()).then_some(identity)
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.identity().map(|identity| identity.role)
    }

    /// Notified on every login and logout
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.token.subscribe()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::in_memory()
    }
}
