//! UpdateUserHandler - Changes an account; the password only when a new one is given.

use std::sync::Arc;

use super::parse_level;
use crate::application::handlers::records::ensure_manager;
use crate::domain::credentials::hash_password;
use crate::domain::foundation::{AuthenticatedUser, ValidationError};
use crate::domain::records::RecordError;
use crate::ports::{UserRepository, UserUpdate};

#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub actor: AuthenticatedUser,
    pub id: i64,
    pub username: String,
    /// Blank keeps the current password.
    pub password: String,
    pub level: String,
}

pub struct UpdateUserHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: UpdateUserCommand) -> Result<(), RecordError> {
        ensure_manager(&cmd.actor)?;

        let username = cmd.username.trim();
        if username.is_empty() {
            return Err(ValidationError::empty_field("username").into());
        }
        let level = parse_level(&cmd.level)?;
        let password_hash = if cmd.password.trim().is_empty() {
            None
        } else {
            Some(hash_password(&cmd.password)?)
        };

        let update = UserUpdate {
            username: username.to_string(),
            level,
            password_hash,
        };
        if !self.users.update(cmd.id, &update).await? {
            return Err(RecordError::NotFound);
        }

        tracing::info!(
            user_id = cmd.id,
            password_changed = update.password_hash.is_some(),
            by = %cmd.actor.username,
            "user updated"
        );
        Ok(())
    }
}
