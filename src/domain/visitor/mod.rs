//! Visitor module - Self-service surveys, milestones and donations.

mod errors;
mod scoring;
mod submissions;

pub use errors::SubmissionError;
pub use scoring::{NpsBucket, Score, SurveyScores};
pub use submissions::{
    parse_date, parse_id, DonationAmount, DonationForm, DonationSubmission, MilestoneForm,
    MilestoneSubmission, SurveyForm, SurveySubmission,
};
