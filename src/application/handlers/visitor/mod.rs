//! Visitor-facing handlers. None of these require a session.

mod contributions;
mod events;
mod survey;

pub use contributions::{RecordDonationHandler, RecordMilestoneHandler};
pub use events::{EventGrid, FindParticipantEventsHandler, ParticipantEvents, PublicEventsHandler};
pub use survey::{SubmitSurveyHandler, SurveyFormHandler, SurveyFormView};
