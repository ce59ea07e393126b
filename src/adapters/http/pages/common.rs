//! Rendering and redirect helpers shared by the page handlers.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::adapters::http::state::AppState;
use crate::domain::foundation::AuthenticatedUser;

/// `message` and `error` carried on a redirect.
#[derive(Debug, Default, Deserialize)]
pub struct Flash {
    pub message: Option<String>,
    pub error: Option<String>,
}

/// Query string of the staff list pages.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub page: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

/// Just the page number.
#[derive(Debug, Default, Deserialize)]
pub struct PageParam {
    pub page: Option<String>,
}

/// Nav state every template reads.
fn nav(user: Option<&AuthenticatedUser>) -> Map<String, Value> {
    let mut nav = Map::new();
    if let Some(user) = user {
        nav.insert("username".into(), Value::from(user.username.clone()));
        nav.insert("level".into(), Value::from(user.level.code()));
        nav.insert("is_manager".into(), Value::Bool(user.is_manager()));
    }
    nav
}

/// Renders a page with the nav state merged into `data`.
pub fn render(
    state: &AppState,
    template: &str,
    user: Option<&AuthenticatedUser>,
    data: Value,
) -> Response {
    render_with_status(state, StatusCode::OK, template, user, data)
}

pub fn render_with_status(
    state: &AppState,
    status: StatusCode,
    template: &str,
    user: Option<&AuthenticatedUser>,
    data: Value,
) -> Response {
    let mut context = nav(user);
    if let Value::Object(fields) = data {
        context.extend(fields);
    }

    match state.views.render(template, &context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, template, "template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// The 404 page.
pub fn not_found(state: &AppState, user: Option<&AuthenticatedUser>) -> Response {
    render_with_status(
        state,
        StatusCode::NOT_FOUND,
        "not_found",
        user,
        Value::Object(Map::new()),
    )
}

/// Redirects to `path` with a URL-encoded `message` or `error` parameter.
pub fn redirect_with(path: &str, key: &str, text: &str) -> Response {
    let separator = if path.contains('?') { '&' } else { '?' };
    let location = format!("{}{}{}={}", path, separator, key, urlencoding::encode(text));
    Redirect::to(&location).into_response()
}

pub fn redirect_message(path: &str, message: &str) -> Response {
    redirect_with(path, "message", message)
}

pub fn redirect_error(path: &str, error: &str) -> Response {
    redirect_with(path, "error", error)
}

/// Prefix of pagination links: the path plus any filters, ending where
/// `page=` can be appended.
pub fn page_base(path: &str, filters: &[(&str, Option<&str>)]) -> String {
    let mut base = format!("{}?", path);
    for (key, value) in filters {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            base.push_str(key);
            base.push('=');
            base.push_str(&urlencoding::encode(value));
            base.push('&');
        }
    }
    base
}
