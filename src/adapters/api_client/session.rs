//! Process-wide auth token state for the API client.
//!
//! Every [`super::ApiClient`] built with [`super::ApiClient::new`] shares the
//! global session, so logging in through one client authenticates all of
//! them. Tests build isolated sessions with [`AuthSession::new`].

use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, Secret};

static GLOBAL_SESSION: Lazy<AuthSession> = Lazy::new(AuthSession::new);

/// Shared holder for the current access token.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    token: Arc<RwLock<Option<Secret<String>>>>,
}

impl AuthSession {
    /// A fresh session, independent of the global one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the process-wide session.
    pub fn global() -> Self {
        GLOBAL_SESSION.clone()
    }

    pub fn login(&self, token: impl Into<String>) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(Secret::new(token.into()));
    }

    pub fn logout(&self) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    /// The current token, if logged in.
    pub fn token(&self) -> Option<String> {
        let guard = self.token.read().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().map(|t| t.expose_secret().clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_then_logout() {
        let session = AuthSession::new();
        assert!(!session.is_authenticated());

        session.login("abc");
        assert_eq!(session.token().as_deref(), Some("abc"));

        session.logout();
        assert!(session.token().is_none());
    }

    #[test]
    fn clones_share_state() {
        let session = AuthSession::new();
        let other = session.clone();
        session.login("shared");
        assert_eq!(other.token().as_deref(), Some("shared"));
    }

    #[test]
    fn scoped_sessions_are_isolated_from_global() {
        let scoped = AuthSession::new();
        scoped.login("scoped-only");
        assert_ne!(AuthSession::global().token().as_deref(), Some("scoped-only"));
    }

    #[test]
    fn debug_does_not_leak_token() {
        let session = AuthSession::new();
        session.login("super-secret");
        assert!(!format!("{:?}", session).contains("super-secret"));
    }
}
