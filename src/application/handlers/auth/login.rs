//! LoginHandler - Command handler for staff sign-in.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::credentials::verify_password;
use crate::domain::foundation::{AuthError, AuthenticatedUser, SessionId};
use crate::ports::{SessionStore, UserRepository};

/// Command to sign in with a username and password.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub session_id: SessionId,
    pub user: AuthenticatedUser,
}

/// Handler for signing in.
pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
    session_ttl: Duration,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            session_ttl,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AuthError> {
        if cmd.username.is_empty() || cmd.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let record = self
            .users
            .find_by_username(&cmd.username)
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        let matches = verify_password(&record.password, &cmd.password)
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let user = AuthenticatedUser::new(record.username, record.level);
        let session_id = self
            .sessions
            .create(&user, self.session_ttl)
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;

        tracing::info!(username = %user.username, level = %user.level, "user signed in");
        Ok(LoginResult { session_id, user })
    }
}
