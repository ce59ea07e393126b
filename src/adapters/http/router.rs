//! Axum router configuration.
//!
//! Wires every page to its handler and applies the session middleware,
//! request tracing and the request timeout.

use std::path::Path;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Extension, Router,
};
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use super::middleware::session_middleware;
use super::pages::{auth, misc, records, users, visitor};
use super::state::AppState;
use crate::domain::records::Table;

/// Create the complete application router.
///
/// # Routes
///
/// ## Public
/// - `GET /`, `/about`, `/dashboard`, `/email` - Static pages with nav state
/// - `GET|POST /login`, `GET /logout` - Session lifecycle
/// - `GET /viewEvents` - Event grid with type filter
/// - `GET|POST /eventSurveys` - Events a participant attended, by email
/// - `GET /visitorSurvey/:pid/:eid`, `POST /visitorSurvey` - Event survey
/// - `GET|POST /visitorMilestone`, `GET|POST /visitorDonate` - Self-service forms
/// - `GET /teapot`, `GET /health`
///
/// ## Staff (signed in)
/// - `GET /users`, `/participants`, `/events`, `/surveys`, `/milestones`, `/donations`
/// - `GET /participantMilestones/:id` - One participant's milestones
///
/// ## Managers
/// - `POST /<list>/delete/:id`
/// - `GET|POST /users/add`, `GET|POST /users/edit/:id` - Account forms
/// - `GET|POST /<table>/add`, `GET|POST /<table>/edit/:id` - Generic forms
pub fn app_router(state: AppState, static_dir: &Path, request_timeout: Duration) -> Router {
    let auth_state = state.auth_state();

    Router::new()
        .route("/", get(misc::index))
        .route("/about", get(misc::about))
        .route("/dashboard", get(misc::dashboard))
        .route("/email", get(misc::email))
        .route("/teapot", get(misc::teapot))
        .route("/health", get(misc::health))
        // Session
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        // Visitor
        .route("/viewEvents", get(visitor::view_events))
        .route(
            "/eventSurveys",
            get(visitor::event_surveys).post(visitor::event_surveys_form),
        )
        .route("/visitorSurvey", post(visitor::submit_survey))
        .route("/visitorSurvey/:pid/:eid", get(visitor::survey_form))
        .route(
            "/visitorMilestone",
            get(visitor::milestone_form).post(visitor::record_milestone),
        )
        .route(
            "/visitorDonate",
            get(visitor::donate_form).post(visitor::record_donation),
        )
        // Records
        .merge(record_routes())
        .route(
            "/participantMilestones/:id",
            get(records::participant_milestones),
        )
        // Static assets
        .nest_service("/styles", ServeDir::new(static_dir.join("styles")))
        .nest_service("/images", ServeDir::new(static_dir.join("images")))
        .fallback(misc::fallback)
        .layer(middleware::from_fn_with_state(auth_state, session_middleware))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// List, delete, add and edit routes for every managed table.
///
/// Only catalogued tables get routes, so an unknown table name falls
/// through to the 404 page.
fn record_routes() -> Router<AppState> {
    let mut router = Router::new();

    for table in Table::ALL {
        let name = table.name();
        let table_ext = Extension(table);

        if table.has_list_page() {
            let list = table.list_path();
            router = router
                .route(list, get(records::list_page).layer(table_ext.clone()))
                .route(
                    &format!("{}/delete/:id", list),
                    post(records::delete_record).layer(table_ext.clone()),
                );
        }

        router = if table == Table::Users {
            router
                .route(
                    "/users/add",
                    get(users::add_user_form).post(users::add_user),
                )
                .route(
                    "/users/edit/:id",
                    get(users::edit_user_form).post(users::update_user),
                )
        } else {
            router
                .route(
                    &format!("/{}/add", name),
                    get(records::add_form)
                        .post(records::add_record)
                        .layer(table_ext.clone()),
                )
                .route(
                    &format!("/{}/edit/:id", name),
                    get(records::edit_form)
                        .post(records::update_record)
                        .layer(table_ext),
                )
        };
    }
    router
}
