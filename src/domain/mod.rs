//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, access levels, pagination, errors)
//! - `records` - Table catalog, schema metadata, form processing and labels
//! - `visitor` - Survey scoring and visitor submissions
//! - `credentials` - Password hashing and verification

pub mod credentials;
pub mod foundation;
pub mod records;
pub mod visitor;
