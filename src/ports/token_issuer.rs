//! Token issuing port.
//!
//! Counterpart of `SessionValidator`: whatever this issues, the validator of
//! the same implementation must accept until it expires.

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Issues signed access tokens for authenticated users.
pub trait TokenIssuer: Send + Sync {
    /// Signs a token carrying the user's id, email and role.
    fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError>;
}
