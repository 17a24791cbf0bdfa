//! In-memory admin user repository.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::admin::{AdminUser, NewAdminUser};
use crate::domain::foundation::{AdminUserId, DomainError, ErrorCode, Timestamp};
use crate::ports::AdminUserRepository;

/// In-memory implementation of AdminUserRepository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAdminUserRepository {
    users: Arc<RwLock<Vec<AdminUser>>>,
}

impl InMemoryAdminUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored users
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl AdminUserRepository for InMemoryAdminUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, DomainError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: AdminUserId) -> Result<Option<AdminUser>, DomainError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: &NewAdminUser) -> Result<AdminUser, DomainError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(DomainError::new(
                ErrorCode::DuplicateAdminUser,
                "Admin username or email already exists",
            ));
        }

        let now = Timestamp::now();
        let stored = AdminUser {
            id: AdminUserId::new(users.len() as i64 + 1),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        users.push(stored.clone());
        Ok(stored)
    }

    async fn update_password(
        &self,
        id: AdminUserId,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let user = users.iter_mut().find(|u| u.id == id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::AdminUserNotFound,
                format!("Admin user not found: {}", id),
            )
        })?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Timestamp::now();
        Ok(())
    }
}
