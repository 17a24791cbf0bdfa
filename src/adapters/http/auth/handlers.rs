//! HTTP handlers for auth endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::auth::{
    ChangePasswordCommand, ChangePasswordHandler, GetCurrentUserHandler, GetCurrentUserQuery,
    LoginCommand, LoginHandler,
};
use crate::domain::admin::AuthFlowError;
use crate::ports::{AdminUserRepository, TokenIssuer};

use super::dto::{
    AuthMessageResponse, ChangePasswordRequest, CurrentUserResponse, LoginRequest, LoginResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AuthAppState {
    pub users: Arc<dyn AdminUserRepository>,
    pub issuer: Arc<dyn TokenIssuer>,
}

impl AuthAppState {
    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.users.clone(), self.issuer.clone())
    }

    pub fn current_user_handler(&self) -> GetCurrentUserHandler {
        GetCurrentUserHandler::new(self.users.clone())
    }

    pub fn change_password_handler(&self) -> ChangePasswordHandler {
        ChangePasswordHandler::new(self.users.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/auth/login - Exchange credentials for a token
pub async fn login(
    State(state): State<AuthAppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthApiError> {
    let result = state
        .login_handler()
        .handle(LoginCommand {
            email: request.email.unwrap_or_default(),
            password: request.password.unwrap_or_default(),
        })
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: result.token,
        user: result.user,
    }))
}

/// GET /api/auth/me - Profile of the token holder
pub async fn me(
    State(state): State<AuthAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, AuthApiError> {
    let profile = state
        .current_user_handler()
        .handle(GetCurrentUserQuery { user_id: user.id })
        .await?;

    Ok(Json(CurrentUserResponse { user: profile }))
}

/// PUT /api/auth/change-password - Replace the caller's password
pub async fn change_password(
    State(state): State<AuthAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AuthApiError> {
    state
        .change_password_handler()
        .handle(ChangePasswordCommand {
            user_id: user.id,
            current_password: request.current_password.unwrap_or_default(),
            new_password: request.new_password.unwrap_or_default(),
        })
        .await?;

    Ok(Json(AuthMessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for HTTP responses.
#[derive(Debug)]
pub struct AuthApiError(AuthFlowError);

impl From<AuthFlowError> for AuthApiError {
    fn from(err: AuthFlowError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            AuthFlowError::ValidationFailed { .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
            }
            AuthFlowError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            AuthFlowError::IncorrectPassword => (StatusCode::UNAUTHORIZED, "INCORRECT_PASSWORD"),
            AuthFlowError::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            AuthFlowError::Infrastructure(msg) => {
                tracing::error!(error = %msg, "Auth request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let message = match &self.0 {
            AuthFlowError::Infrastructure(_) => "Internal server error".to_string(),
            other => other.message(),
        };
        (status, Json(ErrorResponse::new(error_code, message))).into_response()
    }
}
