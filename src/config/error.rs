//! Configuration error types

use thiserror::Error;

/// Loading or checking the settings failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read settings: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid settings: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A setting that is missing or out of range.
///
/// Variables are named without the `ELLA_RISES__` prefix.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be set")]
    MissingRequired(&'static str),

    #[error("Port must be between 1 and 65535")]
    InvalidPort,

    #[error("SERVER__REQUEST_TIMEOUT_SECS must be between 1 and {0}")]
    InvalidTimeout(u64),

    #[error("DATABASE__URL must start with postgres:// or postgresql://")]
    InvalidDatabaseUrl,

    #[error("SESSION__REDIS_URL must start with redis:// or rediss://")]
    InvalidRedisUrl,

    #[error("DATABASE__MIN_CONNECTIONS is larger than DATABASE__MAX_CONNECTIONS")]
    InvalidPoolSize,

    #[error("DATABASE__MAX_CONNECTIONS may not exceed {0}")]
    PoolSizeTooLarge(u32),

    #[error("SESSION__SECRET must be at least {0} bytes in production")]
    WeakSessionSecret(usize),

    #[error("SESSION__TTL_SECS must be positive")]
    InvalidSessionTtl,
}
