//! Shared state for the page handlers.

use std::sync::Arc;
use std::time::Duration;

use super::middleware::{AuthState, SessionCookie};
use super::views::Views;
use crate::application::{
    AddRecordHandler, AddUserHandler, DeleteRecordHandler, FindParticipantEventsHandler,
    ListRecordsHandler, LoadAddFormHandler, LoadEditFormHandler, LoginHandler, LogoutHandler,
    ParticipantMilestonesHandler, PublicEventsHandler, RecordDonationHandler,
    RecordMilestoneHandler, SubmitSurveyHandler, SurveyFormHandler, UpdateRecordHandler,
    UpdateUserHandler,
};
use crate::ports::{
    DirectoryReader, RecordRepository, SchemaInspector, SessionStore, SubmissionRepository,
    UserRepository,
};

/// Ports, views and session settings shared by every route.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub directory: Arc<dyn DirectoryReader>,
    pub schema: Arc<dyn SchemaInspector>,
    pub records: Arc<dyn RecordRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub views: Views,
    pub cookie: SessionCookie,
    pub session_ttl: Duration,
}

impl AppState {
    /// State for the session middleware.
    pub fn auth_state(&self) -> AuthState {
        AuthState {
            sessions: self.sessions.clone(),
            cookie: self.cookie.clone(),
        }
    }

    /// Create handlers on demand from the shared state.
    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.users.clone(), self.sessions.clone(), self.session_ttl)
    }

    pub fn logout_handler(&self) -> LogoutHandler {
        LogoutHandler::new(self.sessions.clone())
    }

    pub fn list_records_handler(&self) -> ListRecordsHandler {
        ListRecordsHandler::new(self.directory.clone())
    }

    pub fn delete_record_handler(&self) -> DeleteRecordHandler {
        DeleteRecordHandler::new(self.records.clone())
    }

    pub fn load_add_form_handler(&self) -> LoadAddFormHandler {
        LoadAddFormHandler::new(self.schema.clone())
    }

    pub fn add_record_handler(&self) -> AddRecordHandler {
        AddRecordHandler::new(self.schema.clone(), self.records.clone())
    }

    pub fn load_edit_form_handler(&self) -> LoadEditFormHandler {
        LoadEditFormHandler::new(self.schema.clone(), self.records.clone())
    }

    pub fn update_record_handler(&self) -> UpdateRecordHandler {
        UpdateRecordHandler::new(self.schema.clone(), self.records.clone())
    }

    pub fn participant_milestones_handler(&self) -> ParticipantMilestonesHandler {
        ParticipantMilestonesHandler::new(self.directory.clone())
    }

    pub fn add_user_handler(&self) -> AddUserHandler {
        AddUserHandler::new(self.users.clone())
    }

    pub fn update_user_handler(&self) -> UpdateUserHandler {
        UpdateUserHandler::new(self.users.clone())
    }

    pub fn public_events_handler(&self) -> PublicEventsHandler {
        PublicEventsHandler::new(self.directory.clone())
    }

    pub fn find_participant_events_handler(&self) -> FindParticipantEventsHandler {
        FindParticipantEventsHandler::new(self.directory.clone())
    }

    pub fn survey_form_handler(&self) -> SurveyFormHandler {
        SurveyFormHandler::new(self.directory.clone())
    }

    pub fn submit_survey_handler(&self) -> SubmitSurveyHandler {
        SubmitSurveyHandler::new(self.submissions.clone())
    }

    pub fn record_milestone_handler(&self) -> RecordMilestoneHandler {
        RecordMilestoneHandler::new(self.directory.clone(), self.submissions.clone())
    }

    pub fn record_donation_handler(&self) -> RecordDonationHandler {
        RecordDonationHandler::new(self.directory.clone(), self.submissions.clone())
    }
}
