//! HTTP middleware for axum.
//!
//! - `auth` - Session middleware and extractors
//! - `cookie` - Signed session cookie

pub mod auth;
pub mod cookie;

pub use auth::{
    session_middleware, AuthRejection, AuthState, CurrentSession, OptionalAuth, RequireAuth,
};
pub use cookie::SessionCookie;
