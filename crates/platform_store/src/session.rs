//! Credential/session provider contract for the issue-tracker widget.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`CredentialProvider`].
pub type SessionFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Opaque bearer credentials supplied by the host session.
pub struct SessionCredentials {
    /// Account name shown in the widget header.
    pub username: String,
    /// Opaque bearer token; never logged or persisted by the engine.
    pub token: String,
}

/// Supplies issue-tracker credentials on demand.
///
/// Acquisition failures are a display concern, not a dashboard-engine
/// error; see [`resolve_auth_state`].
pub trait CredentialProvider {
    /// Returns the current session credentials.
    fn credentials<'a>(&'a self) -> SessionFuture<'a, Result<SessionCredentials, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Provider for hosts without a signed-in session.
pub struct NoopCredentialProvider;

impl CredentialProvider for NoopCredentialProvider {
    fn credentials<'a>(&'a self) -> SessionFuture<'a, Result<SessionCredentials, String>> {
        Box::pin(async { Err("no session available".to_string()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory provider holding fixed credentials.
pub struct MemoryCredentialProvider {
    inner: Rc<RefCell<Option<SessionCredentials>>>,
}

impl MemoryCredentialProvider {
    /// Creates a provider pre-loaded with `credentials`.
    pub fn with_credentials(credentials: SessionCredentials) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Some(credentials))),
        }
    }

    /// Replaces the stored credentials.
    pub fn set(&self, credentials: Option<SessionCredentials>) {
        *self.inner.borrow_mut() = credentials;
    }
}

impl CredentialProvider for MemoryCredentialProvider {
    fn credentials<'a>(&'a self) -> SessionFuture<'a, Result<SessionCredentials, String>> {
        Box::pin(async move {
            self.inner
                .borrow()
                .clone()
                .ok_or_else(|| "no session available".to_string())
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Widget-facing view of the session posture.
pub enum AuthDisplayState {
    /// A session is available for the named account.
    Authenticated {
        /// Account name to display.
        username: String,
    },
    /// No usable session; the widget renders its signed-out state.
    Unauthenticated,
}

/// Resolves the display posture for an issue-tracker widget.
///
/// Provider failures map to [`AuthDisplayState::Unauthenticated`]; they are
/// never surfaced as engine errors.
pub async fn resolve_auth_state(provider: &dyn CredentialProvider) -> AuthDisplayState {
    match provider.credentials().await {
        Ok(credentials) => AuthDisplayState::Authenticated {
            username: credentials.username,
        },
        Err(_) => AuthDisplayState::Unauthenticated,
    }
}
