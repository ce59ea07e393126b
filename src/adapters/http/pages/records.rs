//! Staff list pages and the generic add/edit/delete forms.
//!
//! Routes are registered per table, and each carries its [`Table`] as a
//! request extension.

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Extension, Form,
};
use serde_json::json;

use super::common::{
    page_base, redirect_error, redirect_message, render, Flash, ListParams, PageParam,
};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::{
    AddRecordCommand, DeleteRecordCommand, ListRecordsQuery, RecordListing, UpdateRecordCommand,
};
use crate::domain::foundation::{AuthenticatedUser, RecordId};
use crate::domain::records::{RecordError, Table};

fn unauthorized(table: Table) -> Response {
    redirect_error(table.list_path(), "Unauthorized")
}

/// GET /users, /participants, /events, /surveys, /milestones, /donations
pub async fn list_page(
    State(state): State<AppState>,
    Extension(table): Extension<Table>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListParams>,
) -> Response {
    let segment = table.list_path().trim_start_matches('/');

    let search = params.search.unwrap_or_default();
    let query = ListRecordsQuery {
        table,
        search: Some(search.clone()),
        page: params.page,
    };

    let (listing, message, error) = match state.list_records_handler().handle(query).await {
        Ok(listing) => (Some(listing), params.message, params.error),
        Err(e) => {
            tracing::error!(error = %e, table = %table, "list page failed");
            (
                RecordListing::empty(table),
                None,
                Some(format!("Error loading {}", segment)),
            )
        }
    };

    render(
        &state,
        segment,
        Some(&user),
        json!({
            "page": listing,
            "search": search,
            "page_base": page_base(table.list_path(), &[("search", Some(search.as_str()))]),
            "message": message,
            "error": error,
        }),
    )
}

/// POST /<list>/delete/:id
pub async fn delete_record(
    State(state): State<AppState>,
    Extension(table): Extension<Table>,
    Path(id): Path<String>,
    RequireAuth(user): RequireAuth,
) -> Response {
    if !user.is_manager() {
        return unauthorized(table);
    }
    let entity = table.entity_name();
    let failure = format!("Error deleting {}", entity.to_lowercase());

    let Ok(id) = RecordId::new(id) else {
        return redirect_error(table.list_path(), &failure);
    };
    let cmd = DeleteRecordCommand {
        actor: user,
        table,
        id,
    };

    match state.delete_record_handler().handle(cmd).await {
        Ok(()) => redirect_message(
            table.list_path(),
            &format!("{} deleted successfully", entity),
        ),
        Err(RecordError::Unauthorized) => unauthorized(table),
        Err(e) => {
            tracing::error!(error = %e, table = %table, "delete failed");
            redirect_error(table.list_path(), &failure)
        }
    }
}

/// GET /<table>/add
pub async fn add_form(
    State(state): State<AppState>,
    Extension(table): Extension<Table>,
    RequireAuth(user): RequireAuth,
    Query(flash): Query<Flash>,
) -> Response {
    match state.load_add_form_handler().handle(&user, table).await {
        Ok(schema) => render(
            &state,
            "add",
            Some(&user),
            json!({
                "table_name": table.name(),
                "entity_name": table.entity_name(),
                "return_path": table.list_path(),
                "columns": schema.columns,
                "error": flash.error,
            }),
        ),
        Err(RecordError::Unauthorized) => unauthorized(table),
        Err(e) => {
            tracing::error!(error = %e, table = %table, "add form failed");
            redirect_error(table.list_path(), "Error loading add form")
        }
    }
}

/// POST /<table>/add
pub async fn add_record(
    State(state): State<AppState>,
    Extension(table): Extension<Table>,
    RequireAuth(user): RequireAuth,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let cmd = AddRecordCommand {
        actor: user,
        table,
        fields,
    };

    match state.add_record_handler().handle(cmd).await {
        Ok(()) => redirect_message(table.list_path(), "Record added successfully"),
        Err(RecordError::Unauthorized) => unauthorized(table),
        Err(e) => {
            tracing::error!(error = %e, table = %table, "add record failed");
            redirect_error(
                &format!("/{}/add", table.name()),
                &format!("Error adding record: {}", e),
            )
        }
    }
}

/// GET /<table>/edit/:id
pub async fn edit_form(
    State(state): State<AppState>,
    Extension(table): Extension<Table>,
    Path(id): Path<String>,
    RequireAuth(user): RequireAuth,
    Query(flash): Query<Flash>,
) -> Response {
    let messages = EditMessages {
        missing: "Record not found",
        load_failure: "Error loading edit form",
    };
    edit_page(&state, user, table, id, flash, messages).await
}

/// Errors shown on the list page when the edit form cannot be loaded.
pub(super) struct EditMessages {
    pub missing: &'static str,
    pub load_failure: &'static str,
}

/// Renders the edit form for any table, the user form included.
pub(super) async fn edit_page(
    state: &AppState,
    user: AuthenticatedUser,
    table: Table,
    id: String,
    flash: Flash,
    messages: EditMessages,
) -> Response {
    let Ok(id) = RecordId::new(id) else {
        return redirect_error(table.list_path(), messages.missing);
    };

    match state.load_edit_form_handler().handle(&user, table, id).await {
        Ok(form) => render(
            state,
            "edit",
            Some(&user),
            json!({
                "table_name": table.name(),
                "entity_name": table.entity_name(),
                "return_path": table.list_path(),
                "columns": form.schema.columns,
                "record": form.record,
                "record_id": form.id.as_str(),
                "error": flash.error,
            }),
        ),
        Err(RecordError::Unauthorized) => unauthorized(table),
        Err(RecordError::NotFound) => redirect_error(table.list_path(), messages.missing),
        Err(e) => {
            tracing::error!(error = %e, table = %table, "edit form failed");
            redirect_error(
                table.list_path(),
                &format!("{}: {}", messages.load_failure, e),
            )
        }
    }
}

/// POST /<table>/edit/:id
pub async fn update_record(
    State(state): State<AppState>,
    Extension(table): Extension<Table>,
    Path(id): Path<String>,
    RequireAuth(user): RequireAuth,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    if !user.is_manager() {
        return unauthorized(table);
    }
    let edit_path = format!("/{}/edit/{}", table.name(), urlencoding::encode(&id));
    let id = match RecordId::new(id) {
        Ok(id) => id,
        Err(e) => {
            return redirect_error(&edit_path, &format!("Error updating record: {}", e));
        }
    };
    let cmd = UpdateRecordCommand {
        actor: user,
        table,
        id,
        fields,
    };

    match state.update_record_handler().handle(cmd).await {
        Ok(()) => redirect_message(table.list_path(), "Record updated successfully"),
        Err(RecordError::Unauthorized) => unauthorized(table),
        Err(e) => {
            tracing::error!(error = %e, table = %table, "update record failed");
            redirect_error(&edit_path, &format!("Error updating record: {}", e))
        }
    }
}

/// GET /participantMilestones/:id
pub async fn participant_milestones(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<PageParam>,
) -> Response {
    let Ok(participant_id) = id.trim().parse::<i64>() else {
        return redirect_error("/participants", "Participant not found");
    };
    let result = state
        .participant_milestones_handler()
        .handle(participant_id, params.page.as_deref())
        .await;

    match result {
        Ok(view) => render(
            &state,
            "participant_milestones",
            Some(&user),
            json!({
                "participant": view.participant,
                "page": view.milestones,
                "page_base": page_base(&format!("/participantMilestones/{}", participant_id), &[]),
            }),
        ),
        Err(RecordError::NotFound) => redirect_error("/participants", "Participant not found"),
        Err(e) => {
            tracing::error!(error = %e, participant_id, "participant milestones failed");
            redirect_error("/participants", "Error loading participant milestones")
        }
    }
}
