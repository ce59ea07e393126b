//! The user account forms. Passwords are hashed before they are stored.

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Form,
};
use serde::Deserialize;
use serde_json::json;

use super::common::{not_found, redirect_error, redirect_message, render, Flash};
use super::records::{edit_page, EditMessages};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::{AddUserCommand, UpdateUserCommand};
use crate::domain::records::{FormMode, RecordError, Table, TableSchema};

#[derive(Debug, Default, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub level: String,
}

/// GET /users/add
pub async fn add_user_form(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(flash): Query<Flash>,
) -> Response {
    if !user.is_manager() {
        return redirect_error("/users", "Unauthorized");
    }
    let schema = TableSchema::users(FormMode::Add);
    render(
        &state,
        "add",
        Some(&user),
        json!({
            "table_name": Table::Users.name(),
            "entity_name": Table::Users.entity_name(),
            "return_path": Table::Users.list_path(),
            "columns": schema.columns,
            "error": flash.error,
        }),
    )
}

/// POST /users/add
pub async fn add_user(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<UserForm>,
) -> Response {
    let cmd = AddUserCommand {
        actor: user,
        username: form.username,
        password: form.password,
        level: form.level,
    };

    match state.add_user_handler().handle(cmd).await {
        Ok(_) => redirect_message("/users", "User added successfully"),
        Err(RecordError::Unauthorized) => redirect_error("/users", "Unauthorized"),
        Err(e) => {
            tracing::error!(error = %e, "add user failed");
            redirect_error("/users/add", "Error adding user")
        }
    }
}

/// GET /users/edit/:id
pub async fn edit_user_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RequireAuth(user): RequireAuth,
    Query(flash): Query<Flash>,
) -> Response {
    let messages = EditMessages {
        missing: "User not found",
        load_failure: "Error loading user",
    };
    edit_page(&state, user, Table::Users, id, flash, messages).await
}

/// POST /users/edit/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<UserForm>,
) -> Response {
    if !user.is_manager() {
        return redirect_error("/users", "Unauthorized");
    }
    let Ok(user_id) = id.trim().parse::<i64>() else {
        return not_found(&state, Some(&user));
    };
    let cmd = UpdateUserCommand {
        actor: user,
        id: user_id,
        username: form.username,
        password: form.password,
        level: form.level,
    };

    match state.update_user_handler().handle(cmd).await {
        Ok(()) => redirect_message("/users", "User updated successfully"),
        Err(RecordError::Unauthorized) => redirect_error("/users", "Unauthorized"),
        Err(e) => {
            tracing::error!(error = %e, user_id, "update user failed");
            redirect_error(&format!("/users/edit/{}", user_id), "Error updating user")
        }
    }
}
