//! Admin user repository port.

use async_trait::async_trait;

use crate::domain::admin::{AdminUser, NewAdminUser};
use crate::domain::foundation::{AdminUserId, DomainError};

/// Persistence for back-office users.
#[async_trait]
pub trait AdminUserRepository: Send + Sync {
    /// Finds a user by email (exact match).
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, DomainError>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: AdminUserId) -> Result<Option<AdminUser>, DomainError>;

    /// Inserts a user.
    ///
    /// # Errors
    ///
    /// - `DuplicateAdminUser` if the email or username is taken
    async fn create(&self, user: &NewAdminUser) -> Result<AdminUser, DomainError>;

    /// Replaces the stored password hash.
    ///
    /// # Errors
    ///
    /// - `AdminUserNotFound` if the user doesn't exist
    async fn update_password(&self, id: AdminUserId, password_hash: &str)
        -> Result<(), DomainError>;
}
