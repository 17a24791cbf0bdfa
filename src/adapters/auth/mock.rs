//! Mock session validator for testing.
//!
//! Accepts a fixed set of opaque tokens so HTTP and handler tests don't need
//! to sign real JWTs.
//!
//! # Example
//!
//! ```ignore
//! use catalog_admin::adapters::auth::MockSessionValidator;
//!
//! let validator = MockSessionValidator::new()
//!     .with_admin("admin-token", 1)
//!     .with_editor("editor-token", 2);
//!
//! let result = validator.validate("admin-token").await;
//! assert!(result.is_ok());
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AdminRole, AdminUserId, AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Mock session validator for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    /// Map of valid tokens to their associated users
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Optional error to return for all validations (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    /// Creates a new empty mock validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(token.into(), user);
        }
        self
    }

    /// Adds a token for an admin with a generated email.
    pub fn with_admin(self, token: impl Into<String>, id: i64) -> Self {
        let user = AuthenticatedUser::new(
            AdminUserId::new(id),
            format!("admin{}@test.example.com", id),
            AdminRole::Admin,
        );
        self.with_user(token, user)
    }

    /// Adds a token for an editor with a generated email.
    pub fn with_editor(self, token: impl Into<String>, id: i64) -> Self {
        let user = AuthenticatedUser::new(
            AdminUserId::new(id),
            format!("editor{}@test.example.com", id),
            AdminRole::Editor,
        );
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        if let Ok(mut forced) = self.force_error.write() {
            *forced = Some(error);
        }
        self
    }

    /// Returns the number of registered valid tokens.
    pub fn token_count(&self) -> usize {
        self.tokens.read().map(|t| t.len()).unwrap_or(0)
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().ok().and_then(|e| e.clone()) {
            return Err(error);
        }

        self.tokens
            .read()
            .ok()
            .and_then(|tokens| tokens.get(token).cloned())
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_tokens_resolve_to_their_roles() {
        let validator = MockSessionValidator::new()
            .with_admin("a", 1)
            .with_editor("e", 2);

        assert!(validator.validate("a").await.unwrap().is_admin());
        assert!(!validator.validate("e").await.unwrap().is_admin());
        assert_eq!(validator.token_count(), 2);
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockSessionValidator::new();
        assert_eq!(validator.validate("x").await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let validator = MockSessionValidator::new()
            .with_admin("a", 1)
            .with_error(AuthError::TokenExpired);

        assert_eq!(validator.validate("a").await, Err(AuthError::TokenExpired));
    }
}
