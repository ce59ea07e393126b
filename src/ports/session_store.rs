//! Session store port.
//!
//! Holds the signed-in user behind an opaque session id. Implementations
//! use in-memory storage for development and tests, or Redis when several
//! instances share sessions.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::foundation::{AuthenticatedUser, SessionId};

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Starts a session that expires after `ttl`.
    async fn create(
        &self,
        user: &AuthenticatedUser,
        ttl: Duration,
    ) -> Result<SessionId, SessionStoreError>;

    /// The session's user, or `None` if unknown or expired.
    async fn get(&self, id: &SessionId) -> Result<Option<AuthenticatedUser>, SessionStoreError>;

    /// Ends a session. Unknown ids are ignored.
    async fn destroy(&self, id: &SessionId) -> Result<(), SessionStoreError>;
}

/// Errors that can occur during session store operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    /// Session backend is unavailable.
    #[error("session store unavailable: {0}")]
    Unavailable(String),

    /// Stored session data could not be read or written.
    #[error("session data invalid: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SessionStore) {}
    }

    #[test]
    fn errors_describe_cause() {
        let err = SessionStoreError::Unavailable("connection refused".into());
        assert_eq!(err.to_string(), "session store unavailable: connection refused");
    }
}
