//! Process-start configuration.
//!
//! Configuration is resolved from the environment exactly once and injected
//! into the services that need it. Nothing mutates it at runtime.

use std::env;

/// Default number of seconds an issued bearer token stays valid.
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Credentials and token parameters for the shared credential gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// The single accepted username.
    pub username: String,
    /// The single accepted password.
    pub password: String,
    /// Secret mixed into every token signature.
    pub token_secret: String,
    /// Token lifetime in seconds.
    pub token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_owned(),
            password: "changeme".to_owned(),
            token_secret: "super-secret".to_owned(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    /// Credential gate configuration.
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Resolves configuration from the environment, falling back to defaults
    /// for unset or unparseable values.
    ///
    /// Recognised variables: `AUTH_USERNAME`, `AUTH_PASSWORD`, `TOKEN_SECRET`,
    /// `TOKEN_TTL_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = AuthConfig::default();
        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(defaults.token_ttl_secs);

        Self {
            auth: AuthConfig {
                username: env::var("AUTH_USERNAME").unwrap_or(defaults.username),
                password: env::var("AUTH_PASSWORD").unwrap_or(defaults.password),
                token_secret: env::var("TOKEN_SECRET").unwrap_or(defaults.token_secret),
                token_ttl_secs,
            },
        }
    }
}
