//! Session validation port.
//!
//! The auth middleware hands every Bearer token to this port. The JWT
//! adapter is the production implementation; `MockSessionValidator` serves
//! tests.

use async_trait::async_trait;

use crate::domain::foundation::{AuthenticatedUser, AuthError};

/// Turns a raw access token into the user it was issued to.
///
/// Malformed tokens and bad signatures are `AuthError::InvalidToken`;
/// expired ones are `AuthError::TokenExpired`.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// `token` is the header value with the `Bearer ` prefix removed.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
