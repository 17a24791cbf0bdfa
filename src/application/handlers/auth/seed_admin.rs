//! SeedAdminHandler - Ensures an initial admin account exists at startup.

use std::sync::Arc;

use crate::domain::admin::{hash_password, validate_new_password, AuthFlowError, NewAdminUser};
use crate::domain::foundation::{AdminRole, AdminUserId};
use crate::ports::AdminUserRepository;

/// Command to seed the first admin.
#[derive(Debug, Clone)]
pub struct SeedAdminCommand {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Outcome of seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Created(AdminUserId),
    AlreadyExists(AdminUserId),
}

/// Creates the admin unless a user with the email is already stored.
pub struct SeedAdminHandler {
    users: Arc<dyn AdminUserRepository>,
}

impl SeedAdminHandler {
    pub fn new(users: Arc<dyn AdminUserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: SeedAdminCommand) -> Result<SeedOutcome, AuthFlowError> {
        if let Some(existing) = self.users.find_by_email(&cmd.email).await? {
            tracing::debug!(user_id = %existing.id, "Seed admin already present");
            return Ok(SeedOutcome::AlreadyExists(existing.id));
        }

        validate_new_password(&cmd.password)?;
        let user = self
            .users
            .create(&NewAdminUser {
                username: cmd.username,
                email: cmd.email,
                password_hash: hash_password(&cmd.password)?,
                role: AdminRole::Admin,
            })
            .await?;

        tracing::info!(user_id = %user.id, email = %user.email, "Seeded admin user");
        Ok(SeedOutcome::Created(user.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAdminUserRepository;

    fn cmd() -> SeedAdminCommand {
        SeedAdminCommand {
            username: "admin".to_string(),
            email: "admin@shop.test".to_string(),
            password: "changeme".to_string(),
        }
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let repo = Arc::new(InMemoryAdminUserRepository::new());
        let handler = SeedAdminHandler::new(repo.clone());

        let first = handler.handle(cmd()).await.unwrap();
        let second = handler.handle(cmd()).await.unwrap();

        let SeedOutcome::Created(id) = first else {
            panic!("expected creation");
        };
        assert_eq!(second, SeedOutcome::AlreadyExists(id));
        assert_eq!(repo.user_count().await, 1);
    }

    #[tokio::test]
    async fn seeded_admin_can_log_in() {
        let repo = Arc::new(InMemoryAdminUserRepository::new());
        SeedAdminHandler::new(repo.clone()).handle(cmd()).await.unwrap();

        let user = repo.find_by_email("admin@shop.test").await.unwrap().unwrap();
        assert_eq!(user.role, AdminRole::Admin);
        assert!(user.verify_password("changeme"));
    }
}
