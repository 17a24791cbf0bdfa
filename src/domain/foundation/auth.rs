//! Authentication types for the domain layer.
//!
//! These types represent a back-office user extracted from a validated access
//! token. They carry no token-format dependencies; the `SessionValidator` port
//! populates them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::AdminUserId;

/// Role of a back-office user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    /// Full access, including category mutations.
    #[default]
    Admin,
    /// Read-only access to the catalog.
    Editor,
}

impl AdminRole {
    /// Storage/claim representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::Editor => "editor",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(AdminRole::Admin),
            "editor" => Ok(AdminRole::Editor),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Authenticated user extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The user's identifier (`sub` claim).
    pub id: AdminUserId,

    /// User's email address.
    pub email: String,

    /// Role granted at login time.
    pub role: AdminRole,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: AdminUserId, email: impl Into<String>, role: AdminRole) -> Self {
        Self {
            id,
            email: email.into(),
            role,
        }
    }

    /// Whether this user may mutate the catalog.
    pub fn is_admin(&self) -> bool {
        self.role == AdminRole::Admin
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The token could not be produced.
    #[error("Token signing failed: {0}")]
    SigningFailed(String),
}

impl AuthError {
    /// Returns true if this error indicates the user should log in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}
