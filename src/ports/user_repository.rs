//! User repository port.
//!
//! Portal accounts live in the `users` table. Passwords reach this port
//! already hashed.

use async_trait::async_trait;

use crate::domain::foundation::{AccessLevel, DomainError};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Looks up an account by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DomainError>;

    /// Inserts an account and returns its id.
    async fn create(&self, user: &NewUser) -> Result<i64, DomainError>;

    /// Updates an account. Returns false when no row has the id.
    async fn update(&self, id: i64, update: &UserUpdate) -> Result<bool, DomainError>;
}

/// A stored account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    /// PHC hash, or plaintext on rows that predate hashing.
    pub password: String,
    pub level: AccessLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub level: AccessLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub username: String,
    pub level: AccessLevel,
    /// `None` keeps the current password.
    pub password_hash: Option<String>,
}
