//! Client-side errors.

use serde::Deserialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Fallback message when an error body carries no message.
pub const NETWORK_ERROR: &str = "Network error";

/// Errors raised by [`super::ApiClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// A 2xx body did not have the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Builds an `Api` error from a status and the raw body.
    pub(crate) fn from_body(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            error_code: Option<String>,
            message: Option<String>,
            error: Option<String>,
        }

        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => ClientError::Api {
                status,
                code: parsed.error_code,
                message: parsed
                    .message
                    .or(parsed.error)
                    .unwrap_or_else(|| NETWORK_ERROR.to_string()),
            },
            Err(_) => ClientError::Api {
                status,
                code: None,
                message: NETWORK_ERROR.to_string(),
            },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Decode(_) => None,
        }
    }
}

impl From<ClientError> for DomainError {
    fn from(err: ClientError) -> Self {
        let code = match &err {
            ClientError::Api { status, code, .. } => match (*status, code.as_deref()) {
                (409, Some("CATEGORY_IN_USE")) => ErrorCode::CategoryInUse,
                (409, Some("DUPLICATE_PRODUCT")) => ErrorCode::DuplicateProduct,
                (409, _) => ErrorCode::DuplicateCategory,
                (404, Some("PRODUCT_NOT_FOUND")) => ErrorCode::ProductNotFound,
                (404, _) => ErrorCode::CategoryNotFound,
                (400, _) => ErrorCode::ValidationFailed,
                (401, _) => ErrorCode::Unauthorized,
                (403, _) => ErrorCode::Forbidden,
                _ => ErrorCode::InternalError,
            },
            ClientError::Http(_) | ClientError::Decode(_) => ErrorCode::InternalError,
        };
        DomainError::new(code, err.to_string())
    }
}
