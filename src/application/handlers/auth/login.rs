//! LoginHandler - Exchanges email and password for an access token.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::admin::{AdminProfile, AuthFlowError};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{AdminUserRepository, TokenIssuer};

/// Command to log in.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Token plus the public profile of the user it was issued for.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub token: String,
    pub user: AdminProfile,
}

/// Handler for logging in.
///
/// Unknown email and wrong password produce the same error.
pub struct LoginHandler {
    users: Arc<dyn AdminUserRepository>,
    issuer: Arc<dyn TokenIssuer>,
}

impl LoginHandler {
    pub fn new(users: Arc<dyn AdminUserRepository>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self { users, issuer }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AuthFlowError> {
        let email = cmd.email.trim();
        if email.is_empty() || cmd.password.is_empty() {
            return Err(AuthFlowError::validation(
                "email",
                "Email and password are required",
            ));
        }

        let Some(user) = self.users.find_by_email(email).await? else {
            tracing::warn!(email = %email, "Login attempt for unknown email");
            return Err(AuthFlowError::InvalidCredentials);
        };

        if !user.verify_password(&cmd.password) {
            tracing::warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AuthFlowError::InvalidCredentials);
        }

        let identity = AuthenticatedUser::new(user.id, user.email.clone(), user.role);
        let token = self
            .issuer
            .issue(&identity)
            .map_err(|e| AuthFlowError::Infrastructure(e.to_string()))?;

        tracing::info!(user_id = %user.id, "Admin logged in");
        Ok(LoginResult {
            token,
            user: user.profile(),
        })
    }
}
