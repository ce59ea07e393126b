//! Static pages, the health check and the teapot.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::common::{not_found, render, Flash};
use crate::adapters::http::middleware::OptionalAuth;
use crate::adapters::http::state::AppState;

/// GET /
pub async fn index(State(state): State<AppState>, OptionalAuth(user): OptionalAuth) -> Response {
    render(&state, "index", user.as_ref(), json!({}))
}

/// GET /about
pub async fn about(State(state): State<AppState>, OptionalAuth(user): OptionalAuth) -> Response {
    render(&state, "about", user.as_ref(), json!({}))
}

/// GET /dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(flash): Query<Flash>,
) -> Response {
    render(
        &state,
        "dashboard",
        user.as_ref(),
        json!({ "message": flash.message, "error": flash.error }),
    )
}

/// GET /email
pub async fn email(State(state): State<AppState>, OptionalAuth(user): OptionalAuth) -> Response {
    render(&state, "email", user.as_ref(), json!({}))
}

/// GET /teapot
pub async fn teapot() -> impl IntoResponse {
    (StatusCode::IM_A_TEAPOT, "I'm a teapot")
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Response {
    let database = state.directory.is_available().await;
    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = json!({
        "status": if database { "ok" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
    });
    (status, Json(body)).into_response()
}

/// Any unmatched route.
pub async fn fallback(State(state): State<AppState>, OptionalAuth(user): OptionalAuth) -> Response {
    not_found(&state, user.as_ref())
}
