//! Login session configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum signing secret length accepted in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Key used to sign the session cookie
    pub secret: SecretString,

    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Session lifetime in seconds
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Where sessions are kept
    #[serde(default)]
    pub store: SessionBackend,

    /// Redis URL, required when `store` is `redis`
    pub redis_url: Option<String>,

    /// Adds `Secure` to the cookie. Defaults to on in production.
    pub secure_cookie: Option<bool>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    #[default]
    Memory,
    Redis,
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn secure_cookie(&self, environment: Environment) -> bool {
        self.secure_cookie
            .unwrap_or(environment == Environment::Production)
    }

    /// Validate session configuration
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        let secret = self.secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("SESSION__SECRET"));
        }
        if environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::WeakSessionSecret(MIN_PRODUCTION_SECRET_LEN));
        }
        if self.cookie_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SESSION__COOKIE_NAME"));
        }
        if self.ttl_secs == 0 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.store == SessionBackend::Redis {
            let url = self
                .redis_url
                .as_deref()
                .ok_or(ValidationError::MissingRequired("SESSION__REDIS_URL"))?;
            if !url.starts_with("redis://") && !url.starts_with("rediss://") {
                return Err(ValidationError::InvalidRedisUrl);
            }
        }
        Ok(())
    }
}

fn default_cookie_name() -> String {
    "ella_session".to_string()
}

fn default_ttl() -> u64 {
    86_400
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> SessionConfig {
        SessionConfig {
            secret: SecretString::new(secret.to_string()),
            cookie_name: default_cookie_name(),
            ttl_secs: default_ttl(),
            store: SessionBackend::Memory,
            redis_url: None,
            secure_cookie: None,
        }
    }

    #[test]
    fn test_short_secret_allowed_in_development() {
        assert!(config("dev").validate(Environment::Development).is_ok());
    }

    #[test]
    fn test_short_secret_rejected_in_production() {
        assert_eq!(
            config("dev").validate(Environment::Production),
            Err(ValidationError::WeakSessionSecret(32))
        );
        let long = "x".repeat(32);
        assert!(config(&long).validate(Environment::Production).is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(config("").validate(Environment::Development).is_err());
    }

    #[test]
    fn test_redis_store_requires_url() {
        let mut c = config("dev");
        c.store = SessionBackend::Redis;
        assert_eq!(
            c.validate(Environment::Development),
            Err(ValidationError::MissingRequired("SESSION__REDIS_URL"))
        );

        c.redis_url = Some("http://cache".to_string());
        assert_eq!(
            c.validate(Environment::Development),
            Err(ValidationError::InvalidRedisUrl)
        );

        c.redis_url = Some("redis://cache:6379".to_string());
        assert!(c.validate(Environment::Development).is_ok());
    }

    #[test]
    fn test_secure_cookie_defaults_by_environment() {
        let mut c = config("dev");
        assert!(!c.secure_cookie(Environment::Development));
        assert!(c.secure_cookie(Environment::Production));

        c.secure_cookie = Some(false);
        assert!(!c.secure_cookie(Environment::Production));
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut c = config("dev");
        c.ttl_secs = 0;
        assert_eq!(
            c.validate(Environment::Development),
            Err(ValidationError::InvalidSessionTtl)
        );
    }
}
