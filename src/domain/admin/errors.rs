//! Authentication flow errors.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised by login, profile and password flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFlowError {
    /// Required fields missing or malformed.
    ValidationFailed { field: String, message: String },
    /// Unknown email or wrong password at login.
    InvalidCredentials,
    /// Current password did not match on change.
    IncorrectPassword,
    /// The authenticated user no longer exists.
    UserNotFound,
    /// Infrastructure error.
    Infrastructure(String),
}

impl AuthFlowError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AuthFlowError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            AuthFlowError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AuthFlowError::InvalidCredentials | AuthFlowError::IncorrectPassword => {
                ErrorCode::Unauthorized
            }
            AuthFlowError::UserNotFound => ErrorCode::AdminUserNotFound,
            AuthFlowError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            AuthFlowError::ValidationFailed { message, .. } => message.clone(),
            AuthFlowError::InvalidCredentials => "Invalid credentials".to_string(),
            AuthFlowError::IncorrectPassword => "Current password is incorrect".to_string(),
            AuthFlowError::UserNotFound => "User not found".to_string(),
            AuthFlowError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AuthFlowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AuthFlowError {}

impl From<DomainError> for AuthFlowError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AdminUserNotFound => AuthFlowError::UserNotFound,
            _ => AuthFlowError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for AuthFlowError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        let message = match &err {
            ValidationError::TooShort { min, .. } => {
                format!("New password must be at least {} characters long", min)
            }
            other => other.to_string(),
        };
        AuthFlowError::ValidationFailed { field, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_errors_are_unauthorized() {
        assert_eq!(AuthFlowError::InvalidCredentials.code(), ErrorCode::Unauthorized);
        assert_eq!(AuthFlowError::IncorrectPassword.code(), ErrorCode::Unauthorized);
        assert_eq!(AuthFlowError::InvalidCredentials.to_string(), "Invalid credentials");
    }

    #[test]
    fn too_short_password_message_names_the_minimum() {
        let err = AuthFlowError::from(ValidationError::too_short("newPassword", 6));
        assert_eq!(
            err.message(),
            "New password must be at least 6 characters long"
        );
    }

    #[test]
    fn missing_user_maps_from_domain_error() {
        let err = DomainError::new(ErrorCode::AdminUserNotFound, "gone");
        assert_eq!(AuthFlowError::from(err), AuthFlowError::UserNotFound);
    }
}
