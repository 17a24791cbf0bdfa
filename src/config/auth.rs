//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum JWT secret length enforced in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Authentication configuration (HS256 tokens, optional seed admin)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC key for signing access tokens
    pub jwt_secret: Secret<String>,

    /// `iss` claim written and required on tokens
    #[serde(default = "default_issuer")]
    pub jwt_issuer: String,

    /// Token lifetime in hours
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    #[serde(default = "default_seed_username")]
    pub seed_admin_username: String,

    pub seed_admin_email: Option<String>,

    pub seed_admin_password: Option<Secret<String>>,
}

impl AuthConfig {
    /// Email and password of the admin to create at startup, if configured.
    pub fn seed_admin(&self) -> Option<(&str, &str)> {
        match (&self.seed_admin_email, &self.seed_admin_password) {
            (Some(email), Some(password)) => Some((email.as_str(), password.expose_secret().as_str())),
            _ => None,
        }
    }

    /// Validate authentication configuration
    ///
    /// Production requires a secret of at least
    /// [`MIN_PRODUCTION_SECRET_LEN`] characters.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::WeakJwtSecret(MIN_PRODUCTION_SECRET_LEN));
        }
        if self.token_ttl_hours < 1 || self.token_ttl_hours > 720 {
            return Err(ValidationError::InvalidTokenTtl);
        }
        if self.seed_admin_email.is_some() != self.seed_admin_password.is_some() {
            return Err(ValidationError::IncompleteSeedAdmin);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Secret::new(String::new()),
            jwt_issuer: default_issuer(),
            token_ttl_hours: default_token_ttl_hours(),
            seed_admin_username: default_seed_username(),
            seed_admin_email: None,
            seed_admin_password: None,
        }
    }
}

fn default_issuer() -> String {
    "catalog-admin".to_string()
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_seed_username() -> String {
    "admin".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secret(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: Secret::new(secret.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.jwt_issuer, "catalog-admin");
        assert_eq!(config.token_ttl_hours, 24);
        assert!(config.seed_admin().is_none());
    }

    #[test]
    fn test_missing_secret() {
        assert_eq!(
            AuthConfig::default().validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn test_short_secret_only_allowed_outside_production() {
        let config = with_secret("dev-secret");
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::WeakJwtSecret(MIN_PRODUCTION_SECRET_LEN))
        );

        let strong = with_secret(&"x".repeat(MIN_PRODUCTION_SECRET_LEN));
        assert!(strong.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_ttl_bounds() {
        let config = AuthConfig {
            token_ttl_hours: 0,
            ..with_secret("dev-secret")
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidTokenTtl)
        );
    }

    #[test]
    fn test_seed_admin_needs_both_fields() {
        let half = AuthConfig {
            seed_admin_email: Some("admin@shop.test".to_string()),
            ..with_secret("dev-secret")
        };
        assert_eq!(
            half.validate(&Environment::Development),
            Err(ValidationError::IncompleteSeedAdmin)
        );

        let full = AuthConfig {
            seed_admin_password: Some(Secret::new("changeme".to_string())),
            ..half
        };
        assert!(full.validate(&Environment::Development).is_ok());
        assert_eq!(full.seed_admin(), Some(("admin@shop.test", "changeme")));
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = with_secret("very-private-key");
        assert!(!format!("{:?}", config).contains("very-private-key"));
    }
}
