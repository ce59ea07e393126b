//! Post-event survey handlers.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::visitor::{SubmissionError, SurveyForm};
use crate::ports::{DirectoryReader, EventSummary, NewSurvey, SubmissionRepository};

/// Everything the survey form needs to render.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyFormView {
    pub participant_id: i64,
    pub event: EventSummary,
    /// Dates the participant attended, offered as the occurrence choice.
    pub dates: Vec<NaiveDate>,
}

pub struct SurveyFormHandler {
    directory: Arc<dyn DirectoryReader>,
}

impl SurveyFormHandler {
    pub fn new(directory: Arc<dyn DirectoryReader>) -> Self {
        Self { directory }
    }

    pub async fn handle(
        &self,
        participant_id: i64,
        event_id: i64,
    ) -> Result<SurveyFormView, SubmissionError> {
        let event = self
            .directory
            .find_event(event_id)
            .await?
            .ok_or(SubmissionError::EventNotFound)?;
        let dates = self.directory.survey_dates(participant_id, event_id).await?;

        Ok(SurveyFormView {
            participant_id,
            event,
            dates,
        })
    }
}

pub struct SubmitSurveyHandler {
    submissions: Arc<dyn SubmissionRepository>,
}

impl SubmitSurveyHandler {
    pub fn new(submissions: Arc<dyn SubmissionRepository>) -> Self {
        Self { submissions }
    }

    /// Validates the answers, resolves the registration and stores the survey.
    pub async fn handle(
        &self,
        form: &SurveyForm,
        today: NaiveDate,
    ) -> Result<NewSurvey, SubmissionError> {
        let submission = form.validate(today)?;

        let occurrence_id = self
            .submissions
            .find_occurrence(submission.event_id, submission.occurrence_date)
            .await?
            .ok_or(SubmissionError::OccurrenceNotFound(submission.occurrence_date))?;
        let registration_id = self
            .submissions
            .find_registration(submission.participant_id, occurrence_id)
            .await?
            .ok_or(SubmissionError::RegistrationNotFound)?;

        let survey = NewSurvey {
            registration_id,
            overall: submission.scores.overall(),
            nps_bucket: submission.scores.nps_bucket(),
            scores: submission.scores,
            comments: submission.comments,
            submitted_on: submission.submitted_on,
        };
        self.submissions.insert_survey(&survey).await?;

        tracing::info!(
            registration_id,
            overall = survey.overall,
            nps = %survey.nps_bucket,
            "survey submitted"
        );
        Ok(survey)
    }
}
