//! Shared-credential gate and signed bearer tokens.
//!
//! A single configured username/password pair gates every endpoint. A
//! successful login yields a bearer token of the form
//! `<subject>:<expiry-unix>:<signature>` where the signature is the SHA-256
//! digest of the token secret concatenated with the payload. Verification
//! recomputes the signature and checks expiry; the core never inspects
//! identity beyond the verified subject.

use crate::config::AuthConfig;
use crate::error::ErrorCategory;
use chrono::{DateTime, Utc};
use mockable::Clock;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by the credential gate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The supplied username/password pair does not match the configuration.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The token does not have the `subject:expiry:signature` shape.
    #[error("malformed bearer token")]
    MalformedToken,

    /// The token signature does not match its payload.
    #[error("bearer token signature mismatch")]
    InvalidSignature,

    /// The token expiry lies in the past.
    #[error("bearer token has expired")]
    Expired,
}

impl AuthError {
    /// Maps the error onto the boundary taxonomy.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        ErrorCategory::Unauthorized
    }
}

/// Result type for credential gate operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Issued bearer token with its scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Opaque token string handed to the client.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: &'static str,
}

/// Verified claims extracted from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Authenticated subject (the configured username).
    pub subject: String,
    /// Instant after which the token is rejected.
    pub expires_at: DateTime<Utc>,
}

/// Credential gate validating logins and bearer tokens.
#[derive(Clone)]
pub struct AuthService<C>
where
    C: Clock + Send + Sync,
{
    config: AuthConfig,
    clock: Arc<C>,
}

impl<C> AuthService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a gate from resolved configuration.
    #[must_use]
    pub const fn new(config: AuthConfig, clock: Arc<C>) -> Self {
        Self { config, clock }
    }

    /// Validates the credential pair and issues a signed token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the pair does not match
    /// the configured credentials.
    pub fn login(&self, username: &str, password: &str) -> AuthResult<AccessToken> {
        if username != self.config.username || password != self.config.password {
            return Err(AuthError::InvalidCredentials);
        }

        let issued_at = self.clock.utc().timestamp();
        let ttl = i64::try_from(self.config.token_ttl_secs).unwrap_or(i64::MAX);
        let expiry = issued_at.saturating_add(ttl);
        let payload = format!("{username}:{expiry}");
        let signature = self.sign(&payload);

        Ok(AccessToken {
            access_token: format!("{payload}:{signature}"),
            token_type: "Bearer",
        })
    }

    /// Verifies a bearer token by signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedToken`] when the token does not split
    /// into subject, expiry, and signature, [`AuthError::InvalidSignature`]
    /// when the signature does not match, or [`AuthError::Expired`] when the
    /// expiry lies in the past.
    pub fn verify(&self, token: &str) -> AuthResult<TokenClaims> {
        let mut parts = token.rsplitn(3, ':');
        let signature = parts.next().ok_or(AuthError::MalformedToken)?;
        let expiry_raw = parts.next().ok_or(AuthError::MalformedToken)?;
        let subject = parts.next().ok_or(AuthError::MalformedToken)?;
        if subject.is_empty() {
            return Err(AuthError::MalformedToken);
        }

        let payload = format!("{subject}:{expiry_raw}");
        if self.sign(&payload) != signature {
            return Err(AuthError::InvalidSignature);
        }

        let expiry: i64 = expiry_raw.parse().map_err(|_| AuthError::MalformedToken)?;
        let expires_at =
            DateTime::<Utc>::from_timestamp(expiry, 0).ok_or(AuthError::MalformedToken)?;
        if expires_at < self.clock.utc() {
            return Err(AuthError::Expired);
        }

        Ok(TokenClaims {
            subject: subject.to_owned(),
            expires_at,
        })
    }

    fn sign(&self, payload: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.config.token_secret.as_bytes());
        hasher.update(payload.as_bytes());
        let digest = hasher.finalize();
        digest.iter().fold(String::with_capacity(64), |mut out, byte| {
            out.push_str(&format!("{byte:02x}"));
            out
        })
    }
}
