//! Authentication types for the domain layer.
//!
//! A staff member logs in with a username and password stored in the
//! `users` table. The session remembers only the username and the access
//! level; everything else is looked up again when needed.
//!
//! # Example
//!
//! ```ignore
//! let user = AuthenticatedUser::new("kaylee", AccessLevel::Manager);
//! if !user.is_manager() {
//!     return redirect_with_error("/users", "Unauthorized");
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Access level stored in the `users.level` column.
///
/// Only managers may add, edit or delete rows. Anything other than `M` is
/// treated as a regular user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessLevel {
    #[serde(rename = "M")]
    Manager,
    #[serde(rename = "U")]
    User,
}

impl AccessLevel {
    /// Parses the stored column value. Unknown codes map to `User`.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "M" => AccessLevel::Manager,
            _ => AccessLevel::User,
        }
    }

    /// Parses a submitted form value, accepting only `M` or `U`.
    pub fn parse_strict(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "M" => Some(AccessLevel::Manager),
            "U" => Some(AccessLevel::User),
            _ => None,
        }
    }

    /// The single-letter code written to the database.
    pub fn code(&self) -> &'static str {
        match self {
            AccessLevel::Manager => "M",
            AccessLevel::User => "U",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A staff member with a live session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Login name from `users.username`.
    pub username: String,

    /// Access level from `users.level`.
    pub level: AccessLevel,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(username: impl Into<String>, level: AccessLevel) -> Self {
        Self {
            username: username.into(),
            level,
        }
    }

    /// Whether this user may mutate records.
    pub fn is_manager(&self) -> bool {
        self.level == AccessLevel::Manager
    }
}

/// Errors that can occur while logging in.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Username or password was left blank.
    #[error("Missing username or password")]
    MissingCredentials,

    /// No such user, or the password did not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The user store or session store could not be reached.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Message shown on the login page.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "Please provide both username and password",
            AuthError::InvalidCredentials => "Invalid username or password",
            AuthError::ServiceUnavailable(_) => {
                "An error occurred during login. Please try again."
            }
        }
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
