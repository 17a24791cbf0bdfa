//! Back-office users and password handling.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AdminRole, AdminUserId, DomainError, ErrorCode, Timestamp, ValidationError,
};

/// Minimum length accepted for a new password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A stored back-office user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: AdminRole,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AdminUser {
    /// Checks a plaintext password against the stored argon2 hash.
    ///
    /// A stored hash that cannot be parsed never verifies.
    pub fn verify_password(&self, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.password_hash) else {
            tracing::warn!(user_id = %self.id, "Stored password hash is not a valid PHC string");
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Public view without the password hash.
    pub fn profile(&self) -> AdminProfile {
        AdminProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// User data safe to return over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: AdminUserId,
    pub username: String,
    pub email: String,
    pub role: AdminRole,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields for inserting a user. The password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdminUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: AdminRole,
}

/// Hashes a password with argon2 and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to hash password: {}", e),
            )
        })
}

/// Rejects passwords shorter than [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::too_short("newPassword", MIN_PASSWORD_LENGTH));
    }
    Ok(())
}
