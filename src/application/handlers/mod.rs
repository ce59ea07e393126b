//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod auth;
pub mod records;
pub mod users;
pub mod visitor;

#[cfg(test)]
pub(crate) mod testing;
