//! Public pages: the event grid and the self-service forms.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::common::{page_base, render};
use crate::adapters::http::middleware::OptionalAuth;
use crate::adapters::http::state::AppState;
use crate::domain::foundation::{AuthenticatedUser, Page, EVENT_GRID_PAGE_SIZE, today_utc};
use crate::domain::visitor::{DonationForm, MilestoneForm, SubmissionError, SurveyForm};
use crate::ports::EventSummary;

const SCORE_FIELDS: &[(&str, &str)] = &[
    ("surveysatisfactionscore", "How satisfied were you with the event?"),
    ("surveyusefulnessscore", "How useful was what you learned?"),
    ("surveyinstructorscore", "How would you rate the instructor?"),
    ("surveyrecommendationscore", "How likely are you to recommend us to a friend?"),
];

#[derive(Debug, Default, Deserialize)]
pub struct EventGridParams {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventSurveysParams {
    #[serde(default)]
    pub participantemail: String,
    pub page: Option<String>,
}

/// GET /viewEvents
pub async fn view_events(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(params): Query<EventGridParams>,
) -> Response {
    let result = state
        .public_events_handler()
        .handle(params.event_type.as_deref(), params.page.as_deref())
        .await;

    let data = match result {
        Ok(grid) => json!({
            "page_base": page_base("/viewEvents", &[("type", Some(grid.selected_type.as_str()))]),
            "page": grid.events,
            "event_types": grid.event_types,
            "selected_type": grid.selected_type,
        }),
        Err(e) => {
            tracing::error!(error = %e, "event grid failed");
            json!({
                "page": Page::<EventSummary>::empty(EVENT_GRID_PAGE_SIZE),
                "event_types": Vec::<String>::new(),
                "selected_type": "",
                "error": "Error loading events",
            })
        }
    };
    render(&state, "view_events", user.as_ref(), data)
}

/// GET /eventSurveys?participantemail=
pub async fn event_surveys(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(params): Query<EventSurveysParams>,
) -> Response {
    participant_events_page(&state, user, params).await
}

/// POST /eventSurveys, the email form posted directly.
pub async fn event_surveys_form(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<EventSurveysParams>,
    Form(form): Form<EventSurveysParams>,
) -> Response {
    let params = EventSurveysParams {
        participantemail: form.participantemail,
        page: form.page.or(query.page),
    };
    participant_events_page(&state, user, params).await
}

async fn participant_events_page(
    state: &AppState,
    user: Option<AuthenticatedUser>,
    params: EventSurveysParams,
) -> Response {
    let result = state
        .find_participant_events_handler()
        .handle(&params.participantemail, params.page.as_deref())
        .await;

    match result {
        Ok(found) => {
            let base = page_base(
                "/eventSurveys",
                &[("participantemail", Some(found.participant.email.as_str()))],
            );
            render(
                state,
                "event_surveys",
                user.as_ref(),
                json!({
                    "participant": found.participant,
                    "page": found.events,
                    "page_base": base,
                }),
            )
        }
        Err(SubmissionError::ParticipantNotFound) => render(
            state,
            "email",
            user.as_ref(),
            json!({
                "participantemail": params.participantemail,
                "error_message": "Invalid Email",
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "participant events failed");
            render(
                state,
                "event_surveys",
                user.as_ref(),
                json!({
                    "page": Page::<EventSummary>::empty(EVENT_GRID_PAGE_SIZE),
                    "error": "Error loading events",
                }),
            )
        }
    }
}

fn survey_questions() -> Value {
    SCORE_FIELDS
        .iter()
        .map(|(name, label)| json!({ "name": name, "label": label }))
        .collect()
}

/// GET /visitorSurvey/:pid/:eid
pub async fn survey_form(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path((pid, eid)): Path<(String, String)>,
) -> Response {
    let (Ok(participant_id), Ok(event_id)) = (pid.trim().parse::<i64>(), eid.trim().parse::<i64>())
    else {
        return Redirect::to("/email").into_response();
    };

    match state
        .survey_form_handler()
        .handle(participant_id, event_id)
        .await
    {
        Ok(view) => render(
            &state,
            "visitor_survey",
            user.as_ref(),
            json!({
                "participant_id": view.participant_id,
                "event": view.event,
                "dates": view.dates,
                "score_fields": survey_questions(),
                "scores": [1, 2, 3, 4, 5],
                "today": today_utc(),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, participant_id, event_id, "survey form unavailable");
            Redirect::to("/email").into_response()
        }
    }
}

/// POST /visitorSurvey
pub async fn submit_survey(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<SurveyForm>,
) -> Response {
    let data = match state
        .submit_survey_handler()
        .handle(&form, today_utc())
        .await
    {
        Ok(_) => json!({ "message": "Response submitted!" }),
        Err(e) => {
            tracing::error!(error = %e, "survey submission failed");
            json!({ "error_message": "Unable to submit survey" })
        }
    };
    render(&state, "email", user.as_ref(), data)
}

fn submission_outcome(result: Result<(), SubmissionError>, success: &str) -> Value {
    match result {
        Ok(()) => json!({ "message": success }),
        Err(SubmissionError::ParticipantNotFound) => {
            json!({ "error_message": "Cannot find participant" })
        }
        Err(e) => {
            tracing::error!(error = %e, "visitor submission failed");
            json!({ "error_message": "Unable to submit" })
        }
    }
}

/// GET /visitorMilestone
pub async fn milestone_form(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Response {
    render(&state, "visitor_milestone", user.as_ref(), json!({}))
}

/// POST /visitorMilestone
pub async fn record_milestone(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<MilestoneForm>,
) -> Response {
    let result = state
        .record_milestone_handler()
        .handle(&form)
        .await
        .map(|_| ());
    let data = submission_outcome(result, "Milestone recorded");
    render(&state, "visitor_milestone", user.as_ref(), data)
}

/// GET /visitorDonate
pub async fn donate_form(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Response {
    render(
        &state,
        "visitor_donate",
        user.as_ref(),
        json!({ "today": today_utc() }),
    )
}

/// POST /visitorDonate
pub async fn record_donation(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<DonationForm>,
) -> Response {
    let result = state
        .record_donation_handler()
        .handle(&form)
        .await
        .map(|_| ());
    let mut data = submission_outcome(result, "Donation recorded");
    if let Value::Object(fields) = &mut data {
        fields.insert("today".into(), json!(today_utc()));
    }
    render(&state, "visitor_donate", user.as_ref(), data)
}
