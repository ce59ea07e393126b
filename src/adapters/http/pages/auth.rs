//! Login and logout.

use axum::{
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use serde_json::json;

use super::common::{render, Flash};
use crate::adapters::http::middleware::{CurrentSession, OptionalAuth};
use crate::adapters::http::state::AppState;
use crate::application::LoginCommand;

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login
pub async fn login_page(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(flash): Query<Flash>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    render(
        &state,
        "login",
        None,
        json!({ "message": flash.message, "error": flash.error }),
    )
}

/// POST /login
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let handler = state.login_handler();
    let cmd = LoginCommand {
        username: form.username,
        password: form.password,
    };

    match handler.handle(cmd).await {
        Ok(result) => (
            [(SET_COOKIE, state.cookie.set(&result.session_id))],
            Redirect::to("/"),
        )
            .into_response(),
        Err(e) => {
            if e.is_transient() {
                tracing::error!(error = %e, "login failed");
            }
            render(&state, "login", None, json!({ "error": e.user_message() }))
        }
    }
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, CurrentSession(session): CurrentSession) -> Response {
    if let Some(session_id) = session {
        // The cookie is cleared even if the store could not drop the session.
        if let Err(e) = state.logout_handler().handle(&session_id).await {
            tracing::error!(error = %e, "logout failed");
        }
    }
    ([(SET_COOKIE, state.cookie.clear())], Redirect::to("/login")).into_response()
}
