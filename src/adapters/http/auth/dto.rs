//! Request and response bodies for the auth endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::admin::AdminProfile;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: AdminProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub user: AdminProfile,
}

/// Body for `PUT /api/auth/change-password`. Field names are camelCase on
/// the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthMessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_password_uses_camel_case() {
        let req: ChangePasswordRequest =
            serde_json::from_str(r#"{"currentPassword": "a", "newPassword": "b"}"#).unwrap();
        assert_eq!(req.current_password.as_deref(), Some("a"));
        assert_eq!(req.new_password.as_deref(), Some("b"));
    }
}
