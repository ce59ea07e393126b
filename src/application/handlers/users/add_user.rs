//! AddUserHandler - Creates a portal account with a hashed password.

use std::sync::Arc;

use super::parse_level;
use crate::application::handlers::records::ensure_manager;
use crate::domain::credentials::hash_password;
use crate::domain::foundation::{AuthenticatedUser, ValidationError};
use crate::domain::records::RecordError;
use crate::ports::{NewUser, UserRepository};

#[derive(Debug, Clone)]
pub struct AddUserCommand {
    pub actor: AuthenticatedUser,
    pub username: String,
    pub password: String,
    pub level: String,
}

pub struct AddUserHandler {
    users: Arc<dyn UserRepository>,
}

impl AddUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Returns the new account's id.
    pub async fn handle(&self, cmd: AddUserCommand) -> Result<i64, RecordError> {
        ensure_manager(&cmd.actor)?;

        let username = cmd.username.trim();
        if username.is_empty() {
            return Err(ValidationError::empty_field("username").into());
        }
        if cmd.password.is_empty() {
            return Err(ValidationError::empty_field("password").into());
        }
        let level = parse_level(&cmd.level)?;

        let user = NewUser {
            username: username.to_string(),
            password_hash: hash_password(&cmd.password)?,
            level,
        };
        let id = self.users.create(&user).await?;

        tracing::info!(user_id = id, username = %user.username, by = %cmd.actor.username, "user added");
        Ok(id)
    }
}
