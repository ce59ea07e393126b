//! Session middleware and extractors for axum.
//!
//! This module provides:
//! - `session_middleware` - Layer that reads the signed session cookie and injects the user into extensions
//! - `RequireAuth` - Extractor that requires a signed-in user
//! - `OptionalAuth` - Extractor for pages that show nav state when signed in
//!
//! # Architecture
//!
//! The middleware uses the `SessionStore` port, so in-memory and Redis
//! sessions look the same to handlers.
//!
//! ```text
//! Request → session_middleware → injects AuthenticatedUser + SessionId into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! # Example
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/users", get(list_users))
//!     .layer(middleware::from_fn_with_state(auth_state, session_middleware));
//!
//! async fn list_users(RequireAuth(user): RequireAuth) -> String {
//!     format!("Hello, {}!", user.username)
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::cookie::SessionCookie;
use crate::domain::foundation::{AuthenticatedUser, SessionId};
use crate::ports::SessionStore;

/// Session middleware state.
#[derive(Clone)]
pub struct AuthState {
    pub sessions: Arc<dyn SessionStore>,
    pub cookie: SessionCookie,
}

/// Middleware that resolves the session cookie.
///
/// This middleware:
/// 1. Reads and verifies the signed session cookie
/// 2. Looks the session up in the `SessionStore` port
/// 3. On success, injects `AuthenticatedUser` and `SessionId` into request extensions
/// 4. Otherwise continues without injecting; handlers decide what to do
///
/// A failing store is logged and the request proceeds signed out.
pub async fn session_middleware(
    State(auth): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(session_id) = auth.cookie.read(request.headers()) else {
        return next.run(request).await;
    };

    match auth.sessions.get(&session_id).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
            request.extensions_mut().insert(session_id);
        }
        Ok(None) => {
            tracing::debug!(session_id = %session_id, "session expired or unknown");
        }
        Err(e) => {
            tracing::error!(error = %e, "session store unavailable");
        }
    }
    next.run(request).await
}

/// Extractor that requires a signed-in user.
///
/// If the middleware did not find a live session, the request is
/// redirected to `/login`.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Extractor for optional authentication.
///
/// Returns `None` when signed out, `Some(user)` otherwise.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> axum::extract::FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = parts.extensions.get::<AuthenticatedUser>().cloned();
            Ok(OptionalAuth(user))
        })
    }
}

/// The current session id, when signed in.
#[derive(Debug, Clone, Copy)]
pub struct CurrentSession(pub Option<SessionId>);

impl<S> axum::extract::FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move { Ok(CurrentSession(parts.extensions.get::<SessionId>().copied())) })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No live session.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => Redirect::to("/login").into_response(),
        }
    }
}
