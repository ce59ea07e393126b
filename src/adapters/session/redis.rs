//! Redis-backed session store for deployments running several instances.
//!
//! Each session is a JSON value under `session:<id>` written with SET EX,
//! so Redis expires it on its own.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;

use crate::domain::foundation::{AuthenticatedUser, SessionId};
use crate::ports::{SessionStore, SessionStoreError};

#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
}

impl RedisSessionStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Opens a multiplexed connection to the given Redis URL.
    pub async fn connect(url: &str) -> Result<Self, SessionStoreError> {
        let client = redis::Client::open(url).map_err(unavailable)?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(unavailable)?;
        Ok(Self::new(conn))
    }
}

fn key_for(id: &SessionId) -> String {
    format!("session:{}", id)
}

fn unavailable(e: redis::RedisError) -> SessionStoreError {
    SessionStoreError::Unavailable(e.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(
        &self,
        user: &AuthenticatedUser,
        ttl: Duration,
    ) -> Result<SessionId, SessionStoreError> {
        let id = SessionId::new();
        let payload = serde_json::to_string(user)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;

        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key_for(&id), payload, ttl.as_secs().max(1))
            .await
            .map_err(unavailable)?;
        Ok(id)
    }

    async fn get(&self, id: &SessionId) -> Result<Option<AuthenticatedUser>, SessionStoreError> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = conn.get(key_for(id)).await.map_err(unavailable)?;

        payload
            .map(|p| {
                serde_json::from_str(&p)
                    .map_err(|e| SessionStoreError::Serialization(e.to_string()))
            })
            .transpose()
    }

    async fn destroy(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key_for(id)).await.map_err(unavailable)?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced() {
        let id: SessionId = "6f1c2a9e-3a55-4c1e-9d5e-0f3c8f0f4b11".parse().unwrap();
        assert_eq!(key_for(&id), "session:6f1c2a9e-3a55-4c1e-9d5e-0f3c8f0f4b11");
    }

    #[tokio::test]
    #[ignore = "Requires live Redis instance"]
    async fn stores_and_destroys_sessions() {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1/".to_string());
        let store = RedisSessionStore::connect(&url).await.unwrap();
        let user = AuthenticatedUser::new("boss", crate::domain::foundation::AccessLevel::Manager);

        let id = store.create(&user, Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap(), Some(user));

        store.destroy(&id).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap(), None);
    }
}
