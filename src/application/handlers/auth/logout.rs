//! LogoutHandler - Ends a staff session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

pub struct LogoutHandler {
    sessions: Arc<dyn SessionStore>,
}

impl LogoutHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, session_id: &SessionId) -> Result<(), SessionStoreError> {
        self.sessions.destroy(session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{manager, MockSessionStore};
    use std::time::Duration;

    #[tokio::test]
    async fn destroys_the_session() {
        let store = Arc::new(MockSessionStore::default());
        let id = store
            .create(&manager(), Duration::from_secs(60))
            .await
            .unwrap();

        LogoutHandler::new(store.clone()).handle(&id).await.unwrap();
        assert_eq!(store.count(), 0);
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_session_is_ignored() {
        let store = Arc::new(MockSessionStore::default());
        let result = LogoutHandler::new(store).handle(&SessionId::new()).await;
        assert!(result.is_ok());
    }
}
