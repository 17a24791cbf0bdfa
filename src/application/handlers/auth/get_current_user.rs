//! GetCurrentUserHandler - Loads the profile behind a validated token.

use std::sync::Arc;

use crate::domain::admin::{AdminProfile, AuthFlowError};
use crate::domain::foundation::AdminUserId;
use crate::ports::AdminUserRepository;

/// Query for the caller's profile.
#[derive(Debug, Clone, Copy)]
pub struct GetCurrentUserQuery {
    pub user_id: AdminUserId,
}

pub struct GetCurrentUserHandler {
    users: Arc<dyn AdminUserRepository>,
}

impl GetCurrentUserHandler {
    pub fn new(users: Arc<dyn AdminUserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetCurrentUserQuery) -> Result<AdminProfile, AuthFlowError> {
        self.users
            .find_by_id(query.user_id)
            .await?
            .map(|user| user.profile())
            .ok_or(AuthFlowError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAdminUserRepository;
    use crate::domain::admin::NewAdminUser;
    use crate::domain::foundation::AdminRole;

    #[tokio::test]
    async fn returns_profile_for_existing_user() {
        let repo = Arc::new(InMemoryAdminUserRepository::new());
        let stored = repo
            .create(&NewAdminUser {
                username: "ed".to_string(),
                email: "ed@shop.test".to_string(),
                password_hash: "x".to_string(),
                role: AdminRole::Editor,
            })
            .await
            .unwrap();

        let profile = GetCurrentUserHandler::new(repo)
            .handle(GetCurrentUserQuery { user_id: stored.id })
            .await
            .unwrap();
        assert_eq!(profile.email, "ed@shop.test");
        assert_eq!(profile.role, AdminRole::Editor);
    }

    #[tokio::test]
    async fn deleted_user_is_not_found() {
        let err = GetCurrentUserHandler::new(Arc::new(InMemoryAdminUserRepository::new()))
            .handle(GetCurrentUserQuery {
                user_id: AdminUserId::new(4),
            })
            .await
            .unwrap_err();
        assert_eq!(err, AuthFlowError::UserNotFound);
    }
}
