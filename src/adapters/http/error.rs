//! Shared JSON error body for every HTTP context.

use serde::{Deserialize, Serialize};

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create an error response with details.
    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_without_details_when_none() {
        let json = serde_json::to_string(&ErrorResponse::new("NOT_FOUND", "Not found")).unwrap();
        assert!(!json.contains("details"));
        assert!(json.contains(r#""error_code":"NOT_FOUND""#));
    }

    #[test]
    fn serializes_details_when_present() {
        let response = ErrorResponse::with_details(
            "VALIDATION_FAILED",
            "Invalid",
            serde_json::json!({"field": "name"}),
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["details"]["field"], "name");
    }
}
