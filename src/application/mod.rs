//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers change records; query handlers build page data.

pub mod handlers;

pub use handlers::auth::{LoginCommand, LoginHandler, LoginResult, LogoutHandler};
pub use handlers::records::{
    AddRecordCommand, AddRecordHandler, DeleteRecordCommand, DeleteRecordHandler, EditForm,
    ListRecordsHandler, ListRecordsQuery, LoadAddFormHandler, LoadEditFormHandler,
    ParticipantMilestones, ParticipantMilestonesHandler, RecordListing, UpdateRecordCommand,
    UpdateRecordHandler,
};
pub use handlers::users::{AddUserCommand, AddUserHandler, UpdateUserCommand, UpdateUserHandler};
pub use handlers::visitor::{
    EventGrid, FindParticipantEventsHandler, ParticipantEvents, PublicEventsHandler,
    RecordDonationHandler, RecordMilestoneHandler, SubmitSurveyHandler, SurveyFormHandler,
    SurveyFormView,
};
