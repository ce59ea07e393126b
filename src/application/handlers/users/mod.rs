//! Portal account handlers.
//!
//! Accounts use fixed forms instead of the generic record handlers so
//! passwords can be hashed and kept when left blank.

mod add_user;
mod update_user;

pub use add_user::{AddUserCommand, AddUserHandler};
pub use update_user::{UpdateUserCommand, UpdateUserHandler};

use crate::domain::foundation::{AccessLevel, ValidationError};

fn parse_level(raw: &str) -> Result<AccessLevel, ValidationError> {
    AccessLevel::parse_strict(raw)
        .ok_or_else(|| ValidationError::invalid_format("level", "must be M or U"))
}
