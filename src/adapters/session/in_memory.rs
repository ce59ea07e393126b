//! In-memory session store.
//!
//! Sessions live in a HashMap and vanish on restart. Expired entries are
//! dropped lazily when read and swept on every new login.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthenticatedUser, SessionId};
use crate::ports::{SessionStore, SessionStoreError};

#[derive(Debug, Clone)]
struct SessionEntry {
    user: AuthenticatedUser,
    expires_at: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionEntry>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions currently held, expired ones included.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(
        &self,
        user: &AuthenticatedUser,
        ttl: Duration,
    ) -> Result<SessionId, SessionStoreError> {
        let now = Instant::now();
        let id = SessionId::new();

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, entry| entry.expires_at > now);
        sessions.insert(
            id,
            SessionEntry {
                user: user.clone(),
                expires_at: now + ttl,
            },
        );
        Ok(id)
    }

    async fn get(&self, id: &SessionId) -> Result<Option<AuthenticatedUser>, SessionStoreError> {
        let now = Instant::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(id) {
                None => return Ok(None),
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.user.clone())),
                Some(_) => {}
            }
        }
        self.sessions.write().await.remove(id);
        Ok(None)
    }

    async fn destroy(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::AccessLevel;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new("maria", AccessLevel::Manager)
    }

    #[tokio::test]
    async fn created_session_can_be_read_back() {
        let store = InMemorySessionStore::new();
        let id = store.create(&user(), Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap(), Some(user()));
    }

    #[tokio::test]
    async fn unknown_session_is_none() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.get(&SessionId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn destroyed_session_is_gone() {
        let store = InMemorySessionStore::new();
        let id = store.create(&user(), Duration::from_secs(60)).await.unwrap();
        store.destroy(&id).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn expired_session_is_dropped_on_read() {
        let store = InMemorySessionStore::new();
        let id = store.create(&user(), Duration::ZERO).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn login_sweeps_expired_sessions() {
        let store = InMemorySessionStore::new();
        store.create(&user(), Duration::ZERO).await.unwrap();
        store.create(&user(), Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn destroying_unknown_session_is_ok() {
        let store = InMemorySessionStore::new();
        assert!(store.destroy(&SessionId::new()).await.is_ok());
    }
}
