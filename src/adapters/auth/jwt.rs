//! HS256 JWT adapter for issuing and validating access tokens.
//!
//! Implements both `TokenIssuer` and `SessionValidator` with a shared secret,
//! so tokens issued at login are accepted by the auth middleware until they
//! expire.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AdminRole, AdminUserId, AuthError, AuthenticatedUser, Timestamp};
use crate::ports::{SessionValidator, TokenIssuer};

/// Configuration for the JWT adapter.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC signing secret.
    pub secret: Secret<String>,

    /// Expected and emitted `iss` claim.
    pub issuer: String,

    /// Token lifetime in hours.
    pub ttl_hours: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>, ttl_hours: i64) -> Self {
        Self {
            secret: Secret::new(secret.into()),
            issuer: issuer.into(),
            ttl_hours,
        }
    }
}

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    /// Subject - the admin user ID
    sub: String,
    email: String,
    role: AdminRole,
    iss: String,
    iat: i64,
    exp: i64,
    /// Unique token id
    jti: String,
}

/// Issues and validates HS256 access tokens.
pub struct JwtTokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            config,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError> {
        let now = Timestamp::now();
        let claims = AccessClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            iss: self.config.issuer.clone(),
            iat: now.as_unix_secs(),
            exp: now.plus_hours(self.config.ttl_hours).as_unix_secs(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign access token: {}", e);
            AuthError::SigningFailed(e.to_string())
        })
    }
}

#[async_trait]
impl SessionValidator for JwtTokenService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Invalid issuer in token");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::warn!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })?;
        let claims = data.claims;

        let id: AdminUserId = claims.sub.parse().map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(id, claims.email, claims.role))
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.config.issuer)
            .field("ttl_hours", &self.config.ttl_hours)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-that-is-at-least-32-bytes!";

    fn service(ttl_hours: i64) -> JwtTokenService {
        JwtTokenService::new(JwtConfig::new(SECRET, "catalog-admin", ttl_hours))
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new(AdminUserId::new(7), "admin@example.com", AdminRole::Admin)
    }

    #[tokio::test]
    async fn issued_token_validates_back_to_same_user() {
        let service = service(24);
        let token = service.issue(&admin()).unwrap();

        let user = service.validate(&token).await.unwrap();
        assert_eq!(user, admin());
    }

    #[tokio::test]
    async fn expired_token_is_rejected_as_expired() {
        let service = service(-2);
        let token = service.issue(&admin()).unwrap();

        assert_eq!(service.validate(&token).await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_invalid() {
        let other = JwtTokenService::new(JwtConfig::new(
            "another-secret-that-is-also-long-enough",
            "catalog-admin",
            24,
        ));
        let token = other.issue(&admin()).unwrap();

        assert_eq!(service(24).validate(&token).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn token_from_other_issuer_is_invalid() {
        let other = JwtTokenService::new(JwtConfig::new(SECRET, "someone-else", 24));
        let token = other.issue(&admin()).unwrap();

        assert_eq!(service(24).validate(&token).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        assert_eq!(
            service(24).validate("not-a-jwt").await,
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn debug_output_hides_secret() {
        let output = format!("{:?}", service(1));
        assert!(output.contains("catalog-admin"));
        assert!(!output.contains(SECRET));
    }
}
