//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Data ports over a PostgreSQL pool
//! - `session` - Session stores (in-memory, Redis)
//! - `http` - The axum web front end

pub mod http;
pub mod postgres;
pub mod session;
