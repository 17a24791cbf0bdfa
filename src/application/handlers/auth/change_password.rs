//! ChangePasswordHandler - Replaces the caller's password.

use std::sync::Arc;

use crate::domain::admin::{hash_password, validate_new_password, AuthFlowError};
use crate::domain::foundation::AdminUserId;
use crate::ports::AdminUserRepository;

/// Command to change a password.
#[derive(Debug, Clone)]
pub struct ChangePasswordCommand {
    pub user_id: AdminUserId,
    pub current_password: String,
    pub new_password: String,
}

/// Handler for changing passwords.
///
/// Checks run in order: both fields present, new password length, user
/// exists, current password matches.
pub struct ChangePasswordHandler {
    users: Arc<dyn AdminUserRepository>,
}

impl ChangePasswordHandler {
    pub fn new(users: Arc<dyn AdminUserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: ChangePasswordCommand) -> Result<(), AuthFlowError> {
        if cmd.current_password.is_empty() || cmd.new_password.is_empty() {
            return Err(AuthFlowError::validation(
                "currentPassword",
                "Current password and new password are required",
            ));
        }
        validate_new_password(&cmd.new_password)?;

        let user = self
            .users
            .find_by_id(cmd.user_id)
            .await?
            .ok_or(AuthFlowError::UserNotFound)?;

        if !user.verify_password(&cmd.current_password) {
            return Err(AuthFlowError::IncorrectPassword);
        }

        let hash = hash_password(&cmd.new_password)?;
        self.users.update_password(user.id, &hash).await?;

        tracing::info!(user_id = %user.id, "Password changed");
        Ok(())
    }
}
